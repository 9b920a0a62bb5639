//! Generic OpenAI-compatible provider.
//! Any upstream speaking `/chat/completions` works: OpenAI itself, vLLM,
//! Ollama, LM Studio, Groq, Mistral and most hosted gateways.

use super::api_error;
use super::traits::Provider;
use super::types::{ProviderRequest, ProviderResponse, StopReason};
use crate::error::LlmError;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Pooled client shared by every request to one upstream.
fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|error| {
            tracing::warn!(error = %error, "provider client build failed, using defaults");
            Client::new()
        })
}

pub struct OpenAiCompatibleProvider {
    name: String,
    /// Pre-computed `(header_name, header_value)` for auth.
    cached_auth: Option<(String, String)>,
    /// Pre-computed chat completions URL.
    cached_chat_url: String,
    client: Client,
}

/// How the provider expects the API key to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>`
    XApiKey,
    /// Custom header name
    Custom(String),
}

impl AuthStyle {
    /// Map a configured header name onto an auth style.
    pub fn from_header(header: Option<&str>) -> Self {
        match header.map(str::trim) {
            None | Some("") => Self::Bearer,
            Some(name) if name.eq_ignore_ascii_case("authorization") => Self::Bearer,
            Some(name) if name.eq_ignore_ascii_case("x-api-key") => Self::XApiKey,
            Some(name) => Self::Custom(name.to_string()),
        }
    }
}

impl OpenAiCompatibleProvider {
    pub fn new(
        name: &str,
        base_url: &str,
        api_key: Option<&str>,
        auth_style: AuthStyle,
        timeout_secs: u64,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };

        let cached_auth = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| match &auth_style {
                AuthStyle::Bearer => ("Authorization".to_string(), format!("Bearer {key}")),
                AuthStyle::XApiKey => ("x-api-key".to_string(), key.to_string()),
                AuthStyle::Custom(header) => (header.clone(), key.to_string()),
            });

        Self {
            name: name.to_string(),
            cached_auth,
            cached_chat_url,
            client: build_client(timeout_secs),
        }
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    async fn call_chat_completions(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let (header_name, header_value) =
            self.cached_auth
                .as_ref()
                .ok_or_else(|| LlmError::MissingApiKey {
                    provider: self.name.clone(),
                })?;

        let response = self
            .client
            .post(self.chat_completions_url())
            .header(header_name.as_str(), header_value.as_str())
            .json(request)
            .send()
            .await
            .with_context(|| format!("{} chat completions request failed", self.name))?;

        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await.into());
        }

        response
            .json()
            .await
            .with_context(|| format!("{} chat completions JSON decode failed", self.name))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn build_request(request: &ProviderRequest) -> ChatRequest {
    ChatRequest {
        model: request.model.clone(),
        messages: request
            .messages
            .iter()
            .map(|message| Message {
                role: message.role.as_str(),
                content: message.content.clone(),
            })
            .collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

fn into_provider_response(
    response: ChatResponse,
    provider_name: &str,
) -> Result<ProviderResponse, LlmError> {
    let ChatResponse {
        choices,
        usage,
        model,
    } = response;
    let choice = choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::EmptyResponse {
            provider: provider_name.to_string(),
        })?;

    let text = choice.message.content.unwrap_or_default();
    let mut provider_response = match usage {
        Some(usage) => {
            ProviderResponse::with_usage(text, usage.prompt_tokens, usage.completion_tokens)
        }
        None => ProviderResponse::text_only(text),
    }
    .with_stop_reason(StopReason::from_finish_reason(
        choice.finish_reason.as_deref(),
    ));

    if let Some(api_model) = model {
        provider_response = provider_response.with_model(api_model);
    }
    Ok(provider_response)
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn chat_completion<'a>(
        &'a self,
        request: &'a ProviderRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(async move {
            let chat_response = self.call_chat_completions(&build_request(request)).await?;
            Ok(into_provider_response(chat_response, &self.name)?)
        })
    }
}
