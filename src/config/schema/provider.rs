use serde::{Deserialize, Serialize};

/// Upstream OpenAI-compatible endpoint that executes chat completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name used in logs and error messages
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Base URL; `/chat/completions` is appended unless already present
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Header carrying the key: `Authorization` (bearer, default), `x-api-key`, or any custom name
    #[serde(default)]
    pub auth_header: Option<String>,
    /// Upstream request timeout (default: 120s)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Temperature applied when a request does not carry one
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "openai".into()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: default_base_url(),
            api_key: None,
            auth_header: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}
