use super::compatible::{AuthStyle, OpenAiCompatibleProvider};
use super::traits::Provider;
use crate::config::ProviderConfig;

/// Build the upstream provider described by the `provider:` config section.
pub fn create_provider(config: &ProviderConfig) -> Box<dyn Provider> {
    let auth_style = AuthStyle::from_header(config.auth_header.as_deref());
    Box::new(OpenAiCompatibleProvider::new(
        &config.name,
        &config.base_url,
        config.api_key.as_deref(),
        auth_style,
        config.timeout_secs,
    ))
}
