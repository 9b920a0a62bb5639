use super::support::{GatewayTestServer, TEMPLATE, remove_file, upstream_completion};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use summarize_gateway::config::{GatewayConfig, SummarizeSettings};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn post_summarize(server: &GatewayTestServer, body: String) -> reqwest::Response {
    reqwest::Client::new()
        .post(server.url("/v1/summarize"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("summarize request should complete")
}

async fn mount_unreachable(upstream: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn summarize_forwards_composed_request_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test-key"))
        .and(body_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": TEMPLATE},
                {"role": "user", "content": "hello"}
            ],
            "max_tokens": 150
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_completion("A greeting.")))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = post_summarize(&server, r#"{"text":"hello"}"#.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("completion should be json");
    assert_eq!(body["object"], "chat.completion");
    assert_eq!(body["choices"][0]["message"]["content"], "A greeting.");
    assert_eq!(body["choices"][0]["finish_reason"], "stop");
    assert_eq!(body["usage"]["total_tokens"], 17);
}

#[tokio::test]
async fn summarize_rejects_text_over_limit() {
    let upstream = MockServer::start().await;
    mount_unreachable(&upstream).await;
    let server = GatewayTestServer::start(&upstream).await;

    let body = serde_json::json!({ "text": "a".repeat(101) }).to_string();
    let response = post_summarize(&server, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error should be json");
    assert_eq!(body, serde_json::json!({ "error": "Input text too long" }));
}

#[tokio::test]
async fn summarize_accepts_text_at_limit() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_completion("ok")))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let body = serde_json::json!({ "text": "a".repeat(100) }).to_string();
    let response = post_summarize(&server, body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn summarize_rejects_malformed_bodies() {
    let upstream = MockServer::start().await;
    mount_unreachable(&upstream).await;
    let server = GatewayTestServer::start(&upstream).await;

    for body in ["{", r#"{"body":"hello"}"#, r#"{"text":7}"#, r#"{"text":""}"#] {
        let response = post_summarize(&server, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
        let json: Value = response.json().await.expect("error should be json");
        assert_eq!(json, serde_json::json!({ "error": "Invalid request body" }));
    }
}

#[tokio::test]
async fn summarize_fails_with_500_once_template_is_gone() {
    let upstream = MockServer::start().await;
    mount_unreachable(&upstream).await;
    let server = GatewayTestServer::start(&upstream).await;
    remove_file(&server.template_path());

    for body in [r#"{"text":"hello"}"#, "not json"] {
        let response = post_summarize(&server, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = response.json().await.expect("error should be json");
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }
}

#[tokio::test]
async fn summarize_picks_up_template_edits_without_restart() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "Summarize in one line."},
                {"role": "user", "content": "hello"}
            ],
            "max_tokens": 150
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_completion("hi")))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;
    std::fs::write(server.template_path(), "Summarize in one line.")
        .expect("template should be rewritten");

    let response = post_summarize(&server, r#"{"text":"hello"}"#.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn summarize_without_loaded_config_never_succeeds() {
    let upstream = MockServer::start().await;
    mount_unreachable(&upstream).await;
    let workspace = TempDir::new().expect("temp workspace should be created");
    let server =
        GatewayTestServer::start_with(&upstream, SummarizeSettings::default(), workspace).await;

    let response = post_summarize(&server, r#"{"text":"hello"}"#.to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json().await.expect("error should be json");
    assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn summarize_surfaces_upstream_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = GatewayTestServer::start(&upstream).await;

    let response = post_summarize(&server, r#"{"text":"hello"}"#.to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json().await.expect("error should be json");
    assert_eq!(json["error"]["type"], "server_error");
    assert!(
        json["error"]["message"]
            .as_str()
            .is_some_and(|msg| msg.contains("429"))
    );
}

#[tokio::test]
async fn summarize_slow_upstream_times_out_as_gateway_timeout() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(upstream_completion("late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;
    let gateway = GatewayConfig {
        request_timeout_secs: 1,
        ..GatewayConfig::default()
    };
    let server = GatewayTestServer::start_with_gateway(&upstream, gateway).await;

    let response = post_summarize(&server, r#"{"text":"hello"}"#.to_string()).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn summarize_accepts_bound_above_gateway_body_limit() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_completion("long")))
        .expect(1)
        .mount(&upstream)
        .await;
    let workspace = TempDir::new().expect("temp workspace should be created");
    let template = workspace.path().join("summarize_prompt.txt");
    std::fs::write(&template, TEMPLATE).expect("template should be written");
    let summarize = SummarizeSettings {
        model: "gpt-4o-mini".to_string(),
        max_input_length: 100_000,
        max_summary_length: 150,
        prompt_template_file: template.to_string_lossy().into_owned(),
    };
    let server = GatewayTestServer::start_with(&upstream, summarize, workspace).await;

    let body = serde_json::json!({ "text": "a".repeat(70_000) }).to_string();
    let response = post_summarize(&server, body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn summarize_text_beyond_gateway_body_limit_is_too_long() {
    let upstream = MockServer::start().await;
    mount_unreachable(&upstream).await;
    let server = GatewayTestServer::start(&upstream).await;

    let body = serde_json::json!({ "text": "a".repeat(70_000) }).to_string();
    let response = post_summarize(&server, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = response.json().await.expect("error should be json");
    assert_eq!(json, serde_json::json!({ "error": "Input text too long" }));
}
