use super::Config;

fn non_empty_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    /// Apply environment overrides for deployment settings.
    ///
    /// The `summarize` section is file-only.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env(&["SUMMARIZE_API_KEY", "OPENAI_API_KEY"]) {
            self.provider.api_key = Some(key);
        }

        if let Some(url) = non_empty_env(&["SUMMARIZE_PROVIDER_URL"]) {
            self.provider.base_url = url;
        }

        if let Some(port_str) = non_empty_env(&["SUMMARIZE_GATEWAY_PORT", "PORT"])
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Some(host) = non_empty_env(&["SUMMARIZE_GATEWAY_HOST", "HOST"]) {
            self.gateway.host = host;
        }
    }
}
