use super::support::{GatewayTestServer, upstream_completion};
use reqwest::StatusCode;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn chat_completions_passes_through_to_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_completion("Hi there.")))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Hello"}]
        }))
        .send()
        .await
        .expect("chat request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("completion should be json");
    assert_eq!(body["model"], "gpt-4o-mini-2024-07-18");
    assert_eq!(body["choices"][0]["message"]["content"], "Hi there.");
}

#[tokio::test]
async fn chat_completions_streams_when_asked() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(upstream_completion("First.\n\nSecond.")),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "Hello"}],
            "stream": true
        }))
        .send()
        .await
        .expect("chat request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/event-stream"
    );
    let text = response.text().await.expect("stream should be readable");
    let events: Vec<&str> = text
        .split("\n\n")
        .filter_map(|frame| frame.strip_prefix("data: "))
        .collect();
    assert_eq!(events.last(), Some(&"[DONE]"));
    assert!(events.iter().any(|event| event.contains("chat.completion.chunk")));
}

#[tokio::test]
async fn chat_completions_rejects_empty_messages() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({ "model": "gpt-4o-mini", "messages": [] }))
        .send()
        .await
        .expect("chat request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error should be json");
    assert_eq!(body["error"]["type"], "invalid_request_error");
}
