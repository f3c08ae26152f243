//! # Custom Extractors
//!
//! Helpers that map Axum rejections onto [`AppError::BadRequest`], and the
//! [`BaseUrl`] extractor used to build absolute links.

use std::convert::Infallible;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequestParts, Path};
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract path parameters, mapping parse failures (e.g. a non-numeric id)
/// to [`AppError::BadRequest`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Scheme and authority that links in responses are rooted at, without a
/// trailing slash.
///
/// Taken from the request's `Host` header (and `X-Forwarded-Proto`, when
/// present). Falls back to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// Join a path (starting with `/`) onto the base.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    fn from_parts(parts: &Parts, fallback: &str) -> Self {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty());

        match host {
            Some(host) => {
                let scheme = parts
                    .headers
                    .get("x-forwarded-proto")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("http");
                Self(format!("{scheme}://{host}"))
            }
            None => Self(fallback.trim_end_matches('/').to_string()),
        }
    }
}

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, &state.config.base_url))
    }
}
