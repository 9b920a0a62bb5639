// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod scrub;
pub mod traits;
pub mod types;

// ── Provider implementations ────────────────────────────────────────────────
pub mod compatible;
pub mod factory;

// ── Re-exports ──────────────────────────────────────────────────────────────
pub use compatible::{AuthStyle, OpenAiCompatibleProvider};
pub use factory::create_provider;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
pub use types::{MessageRole, ProviderMessage, ProviderRequest, ProviderResponse, StopReason};
