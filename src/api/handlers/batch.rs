//! Handler for batch shortening endpoint.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use super::creation_status;
use crate::api::dto::batch::{BatchRequestItem, BatchResponseItem};
use crate::api::extract::ApiJson;
use crate::api::middleware::CurrentUser;
use crate::application::services::BatchItem;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens many URLs in one call.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [
///   { "correlation_id": "a", "original_url": "https://example.com/one" },
///   { "correlation_id": "b", "original_url": "https://example.com/two" }
/// ]
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "correlation_id": "a", "short_url": "http://localhost:8080/Ab3_x9Qz" },
///   { "correlation_id": "b", "short_url": "http://localhost:8080/Q0f-Lm2a" }
/// ]
/// ```
///
/// Items come back in request order. Status is 201, or 409 if any URL was
/// already shortened; non-colliding URLs are stored either way.
///
/// # Errors
///
/// Returns 400 Bad Request if any item is invalid. Nothing is stored then.
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<Vec<BatchRequestItem>>,
) -> Result<(StatusCode, Json<Vec<BatchResponseItem>>), AppError> {
    for item in &payload {
        item.validate()?;
    }

    let items = payload
        .into_iter()
        .map(|item| BatchItem::new(item.correlation_id, item.original_url))
        .collect();

    let outcome = state.batch_service.shorten_batch(items, owner).await?;

    let response = outcome
        .items
        .into_iter()
        .map(|result| BatchResponseItem {
            short_url: state.link_service.short_url(&result.short),
            correlation_id: result.correlation_id,
        })
        .collect();

    Ok((creation_status(outcome.duplicate), Json(response)))
}
