//! Handlers for the caller's own URLs.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::api::dto::user_urls::{DeleteUrlsRequest, UserUrlResponse};
use crate::api::extract::ApiJson;
use crate::api::middleware::CurrentUser;
use crate::domain::delete_event::DeleteRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every URL the caller has shortened, oldest first.
///
/// # Endpoint
///
/// `GET /api/user/urls`
///
/// # Response
///
/// ```json
/// [
///   { "short_url": "http://localhost:8080/Ab3_x9Qz", "original_url": "https://example.com/" }
/// ]
/// ```
///
/// Returns **204 No Content** when the caller has no URLs yet.
pub async fn user_urls_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
) -> Result<Response, AppError> {
    let urls = state.link_service.list_user_urls(owner).await?;

    if urls.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let response: Vec<UserUrlResponse> = urls
        .into_iter()
        .map(|url| UserUrlResponse {
            short_url: state.link_service.short_url(&url.short),
            original_url: url.long_url,
        })
        .collect();

    Ok(Json(response).into_response())
}

/// Soft-deletes some of the caller's URLs in the background.
///
/// # Endpoint
///
/// `DELETE /api/user/urls`
///
/// # Request Body
///
/// ```json
/// ["Ab3_x9Qz", "Q0f-Lm2a"]
/// ```
///
/// # Delete Semantics
///
/// Responds **202 Accepted** as soon as the request is queued. Codes the
/// caller does not own are ignored by the worker. If the queue is full the
/// request is dropped with a warning; the caller is not told.
pub async fn delete_user_urls_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    ApiJson(shorts): ApiJson<DeleteUrlsRequest>,
) -> StatusCode {
    let request = DeleteRequest::new(owner, shorts);
    if request.is_empty() {
        return StatusCode::ACCEPTED;
    }

    let count = request.shorts.len();
    match state.delete_sender.try_send(request) {
        Ok(()) => debug!(owner, count, "Delete request queued"),
        Err(TrySendError::Full(_)) => {
            warn!(owner, count, "Delete queue is full, dropping request")
        }
        Err(TrySendError::Closed(_)) => {
            warn!(owner, count, "Delete worker is gone, dropping request")
        }
    }

    StatusCode::ACCEPTED
}
