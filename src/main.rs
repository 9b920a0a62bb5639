#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use summarize_gateway::config::{Config, DEFAULT_CONFIG_PATH};
use summarize_gateway::gateway::run_gateway;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Text summarization gateway in front of an OpenAI-compatible provider.
#[derive(Debug, Parser)]
#[command(name = "summarize-gateway", version, about)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override `gateway.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `gateway.port`
    #[arg(long)]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    // A missing or broken config is not fatal: the gateway still starts and
    // the summarize endpoint answers 500 until it is fixed and restarted.
    let mut config = Config::load_or_default(&cli.config);
    config.apply_env_overrides();
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    run_gateway(config).await
}
