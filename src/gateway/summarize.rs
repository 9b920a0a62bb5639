//! `POST /v1/summarize`: turns `{"text": ...}` into a chat completion.
//!
//! The prompt template is read from disk on every call, so fixing or
//! editing the file takes effect on the next request without a restart.
//! The composed request is handed straight to [`complete_chat`], which owns
//! the success response.
//!
//! The route carries its own body limit derived from `max_input_length`, so
//! an oversized body still gets the summarize error contract instead of a
//! bare 413.

use super::AppState;
use super::openai_compat_handler::complete_chat;
use super::openai_compat_types::{ChatCompletionRequest, RequestMessage};
use crate::config::SummarizeSettings;
use crate::error::SummarizeError;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::{BytesRejection, FailedToBufferBody};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use std::path::PathBuf;

/// Summarize request body
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// Worst-case JSON escaping: one input byte becomes `\u00XX`.
const MAX_ESCAPED_BYTES_PER_INPUT_BYTE: usize = 6;
/// Room for the `{"text": ...}` envelope and whitespace around it.
const BODY_ENVELOPE_SLACK: usize = 1024;

/// Composes summarize chat completions from a fixed policy.
#[derive(Debug, Clone)]
pub struct Summarizer {
    settings: SummarizeSettings,
}

impl Summarizer {
    pub fn new(settings: SummarizeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SummarizeSettings {
        &self.settings
    }

    /// Largest body that can still carry a text within `max_input_length`.
    pub fn body_limit(&self) -> usize {
        self.settings
            .max_input_length
            .saturating_mul(MAX_ESCAPED_BYTES_PER_INPUT_BYTE)
            .saturating_add(BODY_ENVELOPE_SLACK)
    }

    /// Build the chat completion for one summarize call.
    ///
    /// Order matters: the template is read before the body is looked at, so
    /// a broken template fails every call with a server error.
    pub async fn compose(&self, body: &[u8]) -> Result<ChatCompletionRequest, SummarizeError> {
        let template = self.read_template().await?;
        self.compose_with_template(template, body)
    }

    /// Like [`Summarizer::compose`], for a body the extractor may have
    /// refused to buffer.
    async fn compose_extracted(
        &self,
        body: Result<Bytes, BytesRejection>,
    ) -> Result<ChatCompletionRequest, SummarizeError> {
        let template = self.read_template().await?;
        let body = body.map_err(|rejection| self.body_rejection(&rejection))?;
        self.compose_with_template(template, &body)
    }

    fn body_rejection(&self, rejection: &BytesRejection) -> SummarizeError {
        match rejection {
            BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
                SummarizeError::BodyTooLarge {
                    limit: self.body_limit(),
                }
            }
            other => SummarizeError::InvalidBody(other.body_text()),
        }
    }

    fn compose_with_template(
        &self,
        template: String,
        body: &[u8],
    ) -> Result<ChatCompletionRequest, SummarizeError> {
        let request = decode_request(body)?;

        let max = self.settings.max_input_length;
        if request.text.len() > max {
            return Err(SummarizeError::InputTooLong {
                length: request.text.len(),
                max,
            });
        }

        Ok(ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                RequestMessage::system(template),
                RequestMessage::user(request.text),
            ],
            temperature: None,
            stream: None,
            max_tokens: (self.settings.max_summary_length > 0)
                .then_some(self.settings.max_summary_length),
        })
    }

    async fn read_template(&self) -> Result<String, SummarizeError> {
        if !self.settings.is_configured() {
            return Err(SummarizeError::NotConfigured);
        }
        let path = PathBuf::from(&self.settings.prompt_template_file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SummarizeError::TemplateUnavailable { path, source })
    }
}

fn decode_request(body: &[u8]) -> Result<SummarizeRequest, SummarizeError> {
    let request: SummarizeRequest = serde_json::from_slice(body)
        .map_err(|error| SummarizeError::InvalidBody(error.to_string()))?;
    // `text` is required: an empty string counts as missing.
    if request.text.is_empty() {
        return Err(SummarizeError::InvalidBody("text is empty".to_string()));
    }
    Ok(request)
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotConfigured | Self::TemplateUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            Self::InputTooLong { .. } | Self::BodyTooLarge { .. } => {
                (StatusCode::BAD_REQUEST, "Input text too long")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn log_rejection(error: &SummarizeError) {
    if error.is_server_error() {
        tracing::error!(error = %error, "summarize request failed");
    } else {
        tracing::debug!(error = %error, "summarize request rejected");
    }
}

/// POST /v1/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match state.summarizer.compose_extracted(body).await {
        Ok(request) => complete_chat(&state, request).await,
        Err(error) => {
            log_rejection(&error);
            error.into_response()
        }
    }
}
