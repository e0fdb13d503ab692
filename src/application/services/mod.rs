//! Business logic services for the application layer.

pub mod batch_service;
pub mod link_service;
pub mod user_token;

pub use batch_service::{BatchItem, BatchOutcome, BatchResult, BatchService};
pub use link_service::{LinkService, ShortenOutcome, UserUrl};
pub use user_token::UserTokenCodec;
