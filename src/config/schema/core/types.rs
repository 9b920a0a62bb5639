use crate::config::schema::{GatewayConfig, ProviderConfig, SummarizeSettings};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "summarize_config.yaml";

/// Top-level service configuration.
///
/// Only the `summarize` section is required by the file format; `gateway`
/// and `provider` fall back to their defaults when absent. A config that
/// failed to load is `Config::default()`, whose `summarize` section is
/// all zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summarize: SummarizeSettings,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}
