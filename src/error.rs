use std::path::PathBuf;
use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

// ─── Summarize errors ────────────────────────────────────────────────────────

/// Request-scoped failures of the summarize endpoint.
///
/// Callers only ever see two classes of failure: server-side (template or
/// configuration unavailable) and client-side (bad body, oversized text).
/// The variants keep the detail for logs.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarize prompt template path is not configured")]
    NotConfigured,

    #[error("failed to read summarize prompt template {}: {source}", path.display())]
    TemplateUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("input text too long ({length} > {max})")]
    InputTooLong { length: usize, max: usize },

    /// Body exceeded the largest encoding an in-bound text can have.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl SummarizeError {
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::TemplateUnavailable { .. })
    }
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("No response from {provider}")]
    EmptyResponse { provider: String },
}
