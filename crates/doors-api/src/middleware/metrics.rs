//! # Prometheus Metrics
//!
//! Request and game metrics recorded through the `metrics` facade and
//! exported in Prometheus text format by `metrics-exporter-prometheus`.
//!
//! With no recorder installed (tests, `--no-metrics`) every call here is a
//! no-op.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const HTTP_REQUESTS_TOTAL: &str = "doors_http_requests_total";
pub const GAMES_CREATED_TOTAL: &str = "doors_games_created_total";
pub const GAMES_REMOVED_TOTAL: &str = "doors_games_removed_total";
pub const GAMES_ACTIVE: &str = "doors_games_active";
pub const DOOR_TRANSITIONS_TOTAL: &str = "doors_door_transitions_total";

/// Handle used to render the Prometheus exposition.
#[derive(Clone)]
pub struct ApiMetrics {
    handle: PrometheusHandle,
}

impl ApiMetrics {
    /// Install a global Prometheus recorder and return its handle.
    ///
    /// Fails if a recorder is already installed in this process.
    pub fn install() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        Ok(Self { handle })
    }

    /// Build a recorder without installing it globally. Rendering works but
    /// nothing recorded through the facade reaches it.
    pub fn detached() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        Self {
            handle: recorder.handle(),
        }
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

pub fn game_created() {
    metrics::counter!(GAMES_CREATED_TOTAL).increment(1);
    metrics::gauge!(GAMES_ACTIVE).increment(1.0);
}

pub fn game_removed() {
    metrics::counter!(GAMES_REMOVED_TOTAL).increment(1);
    metrics::gauge!(GAMES_ACTIVE).decrement(1.0);
}

pub fn transition_applied() {
    metrics::counter!(DOOR_TRANSITIONS_TOTAL, "outcome" => "applied").increment(1);
}

pub fn transition_rejected() {
    metrics::counter!(DOOR_TRANSITIONS_TOTAL, "outcome" => "rejected").increment(1);
}

/// Middleware that counts requests by method and response status.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}
