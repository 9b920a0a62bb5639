use super::types::{ProviderRequest, ProviderResponse};
use std::future::Future;
use std::pin::Pin;

/// An upstream that executes chat completions.
pub trait Provider: Send + Sync {
    /// Provider identifier used in logs and error messages.
    fn name(&self) -> &str;

    fn chat_completion<'a>(
        &'a self,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>>;
}
