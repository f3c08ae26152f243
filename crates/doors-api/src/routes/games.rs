//! # Games API
//!
//! Game creation, inspection, removal, and door transitions.
//!
//! Routes:
//! - POST   /games                          — Create a game (201 + Location)
//! - GET    /games/{game_id}                — Game resource
//! - DELETE /games/{game_id}                — Remove a game
//! - GET    /games/{game_id}/doors          — Doors resource
//! - PUT    /games/{game_id}/doors/{door_id} — Transition a door
//!
//! Resources carry `links` with absolute hrefs rooted at the request's
//! [`BaseUrl`]. Door content stays `UNKNOWN` until the door is opened or
//! the game is over.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use doors_core::{Door, DoorContent, DoorId, DoorStatus, Game, GameId, GameStatus, STATUS_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_json, extract_path, BaseUrl};
use crate::state::AppState;

// -- Representations ----------------------------------------------------------

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Relation name: `self` or `doors`.
    pub rel: String,
    /// Absolute URI.
    pub href: String,
}

impl Link {
    fn new(rel: &str, href: String) -> Self {
        Self {
            rel: rel.to_string(),
            href,
        }
    }
}

/// Door content as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentView {
    Bicycle,
    SmallFurryAnimal,
    /// Still concealed.
    Unknown,
}

impl From<DoorContent> for ContentView {
    fn from(content: DoorContent) -> Self {
        match content {
            DoorContent::Bicycle => Self::Bicycle,
            DoorContent::SmallFurryAnimal => Self::SmallFurryAnimal,
        }
    }
}

/// Game resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameResource {
    /// AWAITING_INITIAL_SELECTION, AWAITING_FINAL_SELECTION, WON, or LOST.
    #[schema(value_type = String)]
    pub status: GameStatus,
    /// When the game was created (RFC 3339).
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    pub links: Vec<Link>,
}

/// A single door within a doors resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoorResource {
    /// CLOSED, SELECTED, or OPENED.
    #[schema(value_type = String)]
    pub status: DoorStatus,
    pub content: ContentView,
    pub links: Vec<Link>,
}

/// Doors resource: every door of a game, ordered by id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoorsResource {
    pub doors: Vec<DoorResource>,
    pub links: Vec<Link>,
}

fn game_path(id: GameId) -> String {
    format!("/games/{id}")
}

fn doors_path(id: GameId) -> String {
    format!("/games/{id}/doors")
}

fn door_path(game: GameId, door: DoorId) -> String {
    format!("/games/{game}/doors/{door}")
}

impl GameResource {
    pub fn assemble(game: &Game, base: &BaseUrl) -> Self {
        Self {
            status: game.status(),
            created_at: game.created_at(),
            links: vec![
                Link::new("self", base.join(&game_path(game.id()))),
                Link::new("doors", base.join(&doors_path(game.id()))),
            ],
        }
    }
}

impl DoorResource {
    pub fn assemble(game: &Game, door: &Door, base: &BaseUrl) -> Self {
        let revealed = door.status() == DoorStatus::Opened || game.is_over();
        let content = if revealed {
            door.content().into()
        } else {
            ContentView::Unknown
        };
        Self {
            status: door.status(),
            content,
            links: vec![Link::new(
                "self",
                base.join(&door_path(game.id(), door.id())),
            )],
        }
    }
}

impl DoorsResource {
    pub fn assemble(game: &Game, base: &BaseUrl) -> Self {
        Self {
            doors: game
                .doors()
                .iter()
                .map(|door| DoorResource::assemble(game, door, base))
                .collect(),
            links: vec![Link::new("self", base.join(&doors_path(game.id())))],
        }
    }
}

// -- Routes -------------------------------------------------------------------

/// Build the games router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{game_id}", get(show_game).delete(destroy_game))
        .route("/games/{game_id}/doors", get(show_doors))
        .route("/games/{game_id}/doors/{door_id}", put(transition_door))
}

/// POST /games — Create a game.
#[utoipa::path(
    post,
    path = "/games",
    responses(
        (status = 201, description = "Game created",
         headers(("Location" = String, description = "URI of the new game"))),
        (status = 500, description = "Location could not be built", body = crate::error::ErrorBody),
    ),
    tag = "games"
)]
pub(crate) async fn create_game(
    State(state): State<AppState>,
    base: BaseUrl,
) -> Result<impl IntoResponse, AppError> {
    let game = state.games.create();
    let location = base.join(&game_path(game.id()));
    let location = HeaderValue::from_str(&location).map_err(|e| {
        AppError::Internal(format!("invalid Location header {location:?}: {e}"))
    })?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// GET /games/{game_id} — Show a game.
#[utoipa::path(
    get,
    path = "/games/{game_id}",
    params(("game_id" = u64, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game found", body = GameResource),
        (status = 400, description = "Malformed game id", body = crate::error::ErrorBody),
        (status = 404, description = "Game not found", body = crate::error::ErrorBody),
    ),
    tag = "games"
)]
pub(crate) async fn show_game(
    State(state): State<AppState>,
    base: BaseUrl,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<GameResource>, AppError> {
    let game_id = GameId(extract_path(path)?);
    let game = state.games.retrieve(game_id)?;
    Ok(Json(GameResource::assemble(&game, &base)))
}

/// DELETE /games/{game_id} — Remove a game.
#[utoipa::path(
    delete,
    path = "/games/{game_id}",
    params(("game_id" = u64, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game removed"),
        (status = 404, description = "Game not found", body = crate::error::ErrorBody),
    ),
    tag = "games"
)]
pub(crate) async fn destroy_game(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let game_id = GameId(extract_path(path)?);
    state.games.remove(game_id)?;
    Ok(StatusCode::OK)
}

/// GET /games/{game_id}/doors — Show a game's doors.
#[utoipa::path(
    get,
    path = "/games/{game_id}/doors",
    params(("game_id" = u64, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Doors of the game", body = DoorsResource),
        (status = 404, description = "Game not found", body = crate::error::ErrorBody),
    ),
    tag = "games"
)]
pub(crate) async fn show_doors(
    State(state): State<AppState>,
    base: BaseUrl,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<DoorsResource>, AppError> {
    let game_id = GameId(extract_path(path)?);
    let game = state.games.retrieve(game_id)?;
    Ok(Json(DoorsResource::assemble(&game, &base)))
}

/// PUT /games/{game_id}/doors/{door_id} — Transition a door.
///
/// The body is a JSON object whose `status` key names the target door
/// status (`SELECTED` or `OPENED`; matching ignores case). Other keys are
/// ignored.
#[utoipa::path(
    put,
    path = "/games/{game_id}/doors/{door_id}",
    params(
        ("game_id" = u64, Path, description = "Game ID"),
        ("door_id" = u64, Path, description = "Door ID"),
    ),
    request_body(content = HashMap<String, Value>, description = "Object with a `status` key"),
    responses(
        (status = 200, description = "Transition applied"),
        (status = 400, description = "Missing or invalid status", body = crate::error::ErrorBody),
        (status = 404, description = "Game or door not found", body = crate::error::ErrorBody),
        (status = 409, description = "Transition not permitted", body = crate::error::ErrorBody),
    ),
    tag = "games"
)]
pub(crate) async fn transition_door(
    State(state): State<AppState>,
    path: Result<Path<(u64, u64)>, PathRejection>,
    body: Result<Json<HashMap<String, Value>>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let (game_id, door_id) = extract_path(path)?;
    let payload = scalar_payload(extract_json(body)?)?;
    let status = DoorStatus::parse(&payload)?;

    state
        .games
        .transition(GameId(game_id), DoorId(door_id), status)?;
    Ok(StatusCode::OK)
}

/// Flatten a JSON object to its scalar entries, rendering numbers and
/// booleans as strings. Nulls, arrays and objects are dropped, except under
/// the status key where they are rejected.
fn scalar_payload(body: HashMap<String, Value>) -> Result<HashMap<String, String>, AppError> {
    let mut payload = HashMap::with_capacity(body.len());
    for (key, value) in body {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) if key == STATUS_KEY => {
                return Err(AppError::BadRequest(format!(
                    "'{STATUS_KEY}' must be a string"
                )));
            }
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
        };
        payload.insert(key, text);
    }
    Ok(payload)
}
