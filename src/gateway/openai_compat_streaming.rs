use super::openai_compat_types::{ChatCompletionChunk, ChunkChoice, ChunkDelta};
use axum::body::Body;
use axum::http::{Response, StatusCode, header};

/// Replay a finished completion as an OpenAI SSE stream.
pub fn build_sse_response(
    completion_id: &str,
    model: &str,
    content: &str,
    finish_reason: &str,
    created: u64,
) -> Response<Body> {
    let chunks = build_chunks(completion_id, model, content, finish_reason, created);
    let stream = async_stream::stream! {
        for chunk in chunks {
            if let Ok(json) = serde_json::to_string(&chunk) {
                yield Ok::<_, std::convert::Infallible>(format!("data: {json}\n\n"));
            }
        }
        yield Ok("data: [DONE]\n\n".to_string());
    };

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static("keep-alive"),
    );
    response
}

fn build_chunks(
    id: &str,
    model: &str,
    content: &str,
    finish_reason: &str,
    created: u64,
) -> Vec<ChatCompletionChunk> {
    let chunk = |delta: ChunkDelta, finish_reason: Option<String>| ChatCompletionChunk {
        id: id.to_string(),
        object: "chat.completion.chunk".to_string(),
        created,
        model: model.to_string(),
        choices: vec![ChunkChoice {
            index: 0,
            delta,
            finish_reason,
        }],
    };

    let mut chunks = vec![chunk(
        ChunkDelta {
            role: Some("assistant".to_string()),
            content: None,
        },
        None,
    )];

    // Paragraph boundaries are kept so clients can rejoin the deltas verbatim.
    chunks.extend(content.split_inclusive("\n\n").map(|paragraph| {
        chunk(
            ChunkDelta {
                role: None,
                content: Some(paragraph.to_string()),
            },
            None,
        )
    }));

    chunks.push(chunk(ChunkDelta::default(), Some(finish_reason.to_string())));
    chunks
}
