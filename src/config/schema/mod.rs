mod core;
mod gateway;
mod provider;
mod summarize;

pub use self::core::{Config, DEFAULT_CONFIG_PATH};
pub use gateway::GatewayConfig;
pub use provider::ProviderConfig;
pub use summarize::SummarizeSettings;
