use super::AppState;
use super::openai_compat_streaming::build_sse_response;
use super::openai_compat_types::{
    ChatCompletion, ChatCompletionRequest, Choice, ChoiceMessage, CompletionUsage, RequestMessage,
};
use crate::llm::{MessageRole, ProviderMessage, ProviderRequest, sanitize_api_error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// POST /v1/chat/completions
pub async fn handle_chat_completions(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Response {
    complete_chat(&state, request).await
}

/// Execute a chat completion against the configured provider and write the
/// OpenAI-shaped response.
///
/// This is the single place that produces a response for a chat completion,
/// whether the request arrived over HTTP or was composed in-process.
pub async fn complete_chat(state: &AppState, request: ChatCompletionRequest) -> Response {
    let provider_request = match to_provider_request(&request, state.temperature) {
        Ok(provider_request) => provider_request,
        Err(message) => {
            return error_response(StatusCode::BAD_REQUEST, &message, "invalid_request_error");
        }
    };

    tracing::debug!(
        provider = state.provider.name(),
        model = %provider_request.model,
        messages = provider_request.messages.len(),
        max_tokens = ?provider_request.max_tokens,
        "dispatching chat completion"
    );

    let response = match state.provider.chat_completion(&provider_request).await {
        Ok(response) => response,
        Err(error) => {
            let message = sanitize_api_error(&format!("{error:#}"));
            tracing::error!(
                provider = state.provider.name(),
                error = %message,
                "chat completion failed"
            );
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &message, "server_error");
        }
    };

    let completion_id = format!("chatcmpl-{}", uuid::Uuid::new_v4());
    let created = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs());
    let model = response.model.clone().unwrap_or(request.model);
    let finish_reason = response
        .stop_reason
        .map_or("stop", |reason| reason.finish_reason());

    if request.stream.unwrap_or(false) {
        return build_sse_response(&completion_id, &model, &response.text, finish_reason, created)
            .into_response();
    }

    let usage = response
        .input_tokens
        .zip(response.output_tokens)
        .map(|(prompt_tokens, completion_tokens)| CompletionUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        });

    Json(ChatCompletion {
        id: completion_id,
        object: "chat.completion".to_string(),
        created,
        model,
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content: response.text,
            },
            finish_reason: finish_reason.to_string(),
        }],
        usage,
    })
    .into_response()
}

fn error_response(status: StatusCode, message: &str, kind: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": { "message": message, "type": kind }
        })),
    )
        .into_response()
}

fn to_provider_request(
    request: &ChatCompletionRequest,
    default_temperature: Option<f64>,
) -> Result<ProviderRequest, String> {
    if request.messages.is_empty() {
        return Err("messages must not be empty".to_string());
    }

    let messages = request
        .messages
        .iter()
        .map(to_provider_message)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProviderRequest {
        model: request.model.clone(),
        messages,
        temperature: request.temperature.or(default_temperature),
        max_tokens: request.max_tokens,
    })
}

fn to_provider_message(message: &RequestMessage) -> Result<ProviderMessage, String> {
    let role = MessageRole::from_wire(&message.role)
        .ok_or_else(|| format!("unsupported message role: {}", message.role))?;
    Ok(ProviderMessage {
        role,
        content: message.content.clone(),
    })
}
