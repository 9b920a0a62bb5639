//! Axum HTTP gateway.
//!
//! Routes:
//! - `POST /v1/summarize` composes a chat completion from the configured
//!   prompt template and hands it to the chat completion handler
//! - `POST /v1/chat/completions` is the OpenAI-compatible endpoint
//! - `GET /health`
//!
//! Body size and request time are bounded by tower-http layers.

mod handlers;
pub(crate) mod openai_compat_handler;
pub(crate) mod openai_compat_streaming;
pub mod openai_compat_types;
mod server;
pub mod summarize;

pub use openai_compat_handler::complete_chat;
pub use openai_compat_types::{ChatCompletionRequest, RequestMessage};
pub use server::{build_app, build_state, run_gateway, run_gateway_with_listener};
pub use summarize::Summarizer;

use crate::llm::Provider;
use std::sync::Arc;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
    pub summarizer: Arc<Summarizer>,
    /// Temperature applied when a chat request does not set one
    pub temperature: Option<f64>,
}
