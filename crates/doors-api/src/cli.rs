//! # Command-Line Configuration
//!
//! Server configuration parsed with clap derive macros. Every flag falls
//! back to an environment variable, so the binary can be configured either
//! way in a container.

use std::net::{IpAddr, Ipv4Addr};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::state::AppConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Doors API server
///
/// Serves the three-door game over HTTP with hypermedia links, health
/// probes, Prometheus metrics, and an OpenAPI document.
#[derive(Parser, Debug, Clone)]
#[command(name = "doors-api", version, about, long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "DOORS_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Port to bind the HTTP server to.
    #[arg(long, short, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL for links in responses to requests without a Host header.
    /// Defaults to `http://localhost:<port>`.
    #[arg(long, env = "DOORS_BASE_URL")]
    pub base_url: Option<String>,

    /// Log output format.
    #[arg(long, env = "DOORS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Disable Prometheus metrics and the `/metrics` endpoint.
    #[arg(
        long,
        env = "DOORS_METRICS_DISABLED",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub no_metrics: bool,

    /// Allow cross-origin requests from any origin.
    #[arg(
        long,
        env = "DOORS_CORS_ALLOW_ANY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub cors_allow_any: bool,
}

impl Cli {
    /// Resolve the parsed arguments into an [`AppConfig`].
    pub fn to_config(&self) -> AppConfig {
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port));

        AppConfig {
            bind: self.bind,
            port: self.port,
            base_url: base_url.trim_end_matches('/').to_string(),
            metrics_enabled: !self.no_metrics,
            cors_allow_any: self.cors_allow_any,
        }
    }
}
