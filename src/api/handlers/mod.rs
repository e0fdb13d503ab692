//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod batch;
pub mod ping;
pub mod redirect;
pub mod shorten;
pub mod user_urls;

use axum::http::StatusCode;

pub use batch::shorten_batch_handler;
pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_handler, shorten_text_handler};
pub use user_urls::{delete_user_urls_handler, user_urls_handler};

/// `201 Created` for freshly stored URLs, `409 Conflict` for known ones.
fn creation_status(duplicate: bool) -> StatusCode {
    if duplicate {
        StatusCode::CONFLICT
    } else {
        StatusCode::CREATED
    }
}
