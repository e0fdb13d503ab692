//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`           - Shorten a plain-text URL
//! - `GET  /ping`       - Storage liveness
//! - `GET  /{short}`    - Short link redirect
//! - `/api/*`           - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Compression** - gzip request bodies in, gzip responses out
//! - **User identity** - `user_token` cookie, minted on first visit
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{ping_handler, redirect_handler, shorten_text_handler};
use crate::api::middleware::{compression, tracing, user_token};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds every route with its middleware, without path normalization.
///
/// Suitable for in-process testing; servers should use [`app_router`].
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(shorten_text_handler))
        .route("/ping", get(ping_handler))
        .route("/{short}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            user_token::layer,
        ))
        .layer(compression::request_layer())
        .layer(compression::response_layer())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state))
}
