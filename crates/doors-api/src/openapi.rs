//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the doors API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Doors API",
        version = "0.1.0",
        description = "A three-door game show over HTTP.\n\nCreate a game, select a door, watch the host open a dud, then open a door to win a bicycle or a small furry animal.",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::games::create_game,
        crate::routes::games::show_game,
        crate::routes::games::destroy_game,
        crate::routes::games::show_doors,
        crate::routes::games::transition_door,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::games::Link,
            crate::routes::games::ContentView,
            crate::routes::games::GameResource,
            crate::routes::games::DoorResource,
            crate::routes::games::DoorsResource,
        ),
    ),
    tags(
        (name = "games", description = "Game lifecycle and door transitions"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
