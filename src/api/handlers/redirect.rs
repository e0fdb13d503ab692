//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// # Response Codes
///
/// - **307 Temporary Redirect**: `Location` carries the original URL
/// - **404 Not Found**: the code was never issued
/// - **410 Gone**: the owner deleted the mapping
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.link_service.resolve(&short).await?;

    Ok(Redirect::temporary(&long_url))
}
