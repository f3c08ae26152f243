//! # doors-api — Binary Entry Point
//!
//! Parses configuration, initialises tracing and metrics, and serves the
//! Axum router until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use doors_api::cli::{Cli, LogFormat};
use doors_api::middleware::metrics::ApiMetrics;
use doors_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    let config = cli.to_config();

    let metrics = if config.metrics_enabled {
        let metrics = ApiMetrics::install().context("installing Prometheus recorder")?;
        tracing::info!("Prometheus metrics enabled at /metrics");
        Some(metrics)
    } else {
        tracing::info!("Prometheus metrics disabled");
        None
    };

    let addr = config.socket_addr();
    let base_url = config.base_url.clone();
    let state = AppState::with_config(config, metrics);
    let app = doors_api::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, %base_url, "doors API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("doors API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
