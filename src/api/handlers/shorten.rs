//! Handlers for single-URL shortening endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use super::creation_status;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::ApiJson;
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL sent as a plain-text body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```text
/// https://example.com/some/long/path
/// ```
///
/// # Response
///
/// The public short URL as plain text, e.g. `http://localhost:8080/Ab3_x9Qz`.
///
/// - **201 Created**: URL stored for the caller
/// - **409 Conflict**: URL was already shortened; the body still carries its short URL
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not an absolute HTTP(S) URL.
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    body: String,
) -> Result<(StatusCode, String), AppError> {
    let outcome = state.link_service.shorten(&body, owner).await?;

    Ok((
        creation_status(outcome.duplicate),
        state.link_service.short_url(&outcome.short),
    ))
}

/// Shortens a URL sent as JSON.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "result": "http://localhost:8080/Ab3_x9Qz" }
/// ```
///
/// Status is 201 for a new URL and 409 for one already shortened.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let outcome = state.link_service.shorten(&payload.url, owner).await?;

    Ok((
        creation_status(outcome.duplicate),
        Json(ShortenResponse {
            result: state.link_service.short_url(&outcome.short),
        }),
    ))
}
