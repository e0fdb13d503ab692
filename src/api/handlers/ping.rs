//! Handler for storage liveness endpoint.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Reports whether the storage backend is reachable.
///
/// # Endpoint
///
/// `GET /ping`
///
/// # Response Codes
///
/// - **200 OK**: backend answered
/// - **500 Internal Server Error**: backend unreachable
///
/// Memory and file backends always answer; only PostgreSQL can fail here.
pub async fn ping_handler(State(state): State<AppState>) -> StatusCode {
    match state.repository.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(
                backend = state.repository.backend_name(),
                "Ping failed: {}",
                e
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
