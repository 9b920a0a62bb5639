pub mod schema;

pub use schema::{
    Config, DEFAULT_CONFIG_PATH, GatewayConfig, ProviderConfig, SummarizeSettings,
};
