use super::handlers::handle_health;
use super::openai_compat_handler::handle_chat_completions;
use super::summarize::handle_summarize;
use super::{AppState, Summarizer};

use crate::config::{Config, GatewayConfig};
use crate::llm;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Run the HTTP gateway on `gateway.host:gateway.port`.
pub async fn run_gateway(config: Config) -> Result<()> {
    let host = config.gateway.host.trim();
    let addr: SocketAddr = format!("{host}:{}", config.gateway.port)
        .parse()
        .with_context(|| format!("parse gateway bind address {host}:{}", config.gateway.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    run_gateway_with_listener(listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("get gateway listener local address")?;

    if !config.summarize.is_configured() {
        tracing::warn!(
            "summarize config not loaded; POST /v1/summarize will answer 500 until restarted with a valid config"
        );
    }

    let state = build_state(&config);
    log_gateway_banner(local_addr, &config);

    let app = build_app(state, &config.gateway);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway stopped");
    Ok(())
}

/// Wire the configured provider and summarize policy into handler state.
pub fn build_state(config: &Config) -> AppState {
    AppState {
        provider: Arc::from(llm::create_provider(&config.provider)),
        summarizer: Arc::new(Summarizer::new(config.summarize.clone())),
        temperature: config.provider.temperature,
    }
}

pub fn build_app(state: AppState, gateway: &GatewayConfig) -> Router {
    // Summarize answers oversized bodies itself, so it never sees a bare 413.
    let summarize_limit = state.summarizer.body_limit().max(gateway.max_body_bytes);

    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/v1/summarize",
            post(handle_summarize).layer(DefaultBodyLimit::max(summarize_limit)),
        )
        .route(
            "/v1/chat/completions",
            post(handle_chat_completions)
                .layer(RequestBodyLimitLayer::new(gateway.max_body_bytes)),
        )
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ))
}

fn log_gateway_banner(local_addr: SocketAddr, config: &Config) {
    tracing::info!(
        addr = %local_addr,
        provider = %config.provider.name,
        model = %config.summarize.model,
        "gateway listening"
    );
    tracing::info!("  POST /v1/summarize");
    tracing::info!("  POST /v1/chat/completions");
    tracing::info!("  GET  /health");
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the task is dropped.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
