//! API route configuration.
//!
//! Every route here sees the caller's identity via
//! [`crate::api::middleware::user_token`].

use crate::api::handlers::{
    delete_user_urls_handler, shorten_batch_handler, shorten_handler, user_urls_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Shorten one URL
/// - `POST   /shorten/batch`  - Shorten many URLs, correlated by id
/// - `GET    /user/urls`      - List the caller's URLs
/// - `DELETE /user/urls`      - Soft-delete some of the caller's URLs
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/batch", post(shorten_batch_handler))
        .route(
            "/user/urls",
            get(user_urls_handler).delete(delete_user_urls_handler),
        )
}
