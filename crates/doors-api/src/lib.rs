//! # doors-api — Axum API Service for the Doors Game
//!
//! HTTP surface over [`doors_core`]: games are created, inspected, removed,
//! and played by transitioning their doors. Responses carry hypermedia
//! links rooted at the request's host.
//!
//! ## API Surface
//!
//! | Path                                  | Module              |
//! |---------------------------------------|---------------------|
//! | `/games/*`                            | [`routes::games`]   |
//! | `/openapi.json`                       | [`openapi`]         |
//! | `/health/liveness`, `/health/readiness` | this module       |
//! | `/metrics`                            | this module         |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer (optional) → TraceLayer → MetricsMiddleware (optional) → Handler
//! ```

pub mod cli;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .merge(routes::games::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics));

    if state.config.metrics_enabled {
        router = router.layer(from_fn(middleware::metrics::metrics_middleware));
    }

    let router = router.layer(middleware::tracing_layer::layer());

    let router = if state.config.cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Liveness probe — the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the game store is accessible.
///
/// Takes the store's read lock, waiting out any in-flight write.
async fn readiness(State(state): State<AppState>) -> &'static str {
    let _ = state.games.len();
    "ready"
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let metrics = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::NotFound("metrics are disabled".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    ))
}
