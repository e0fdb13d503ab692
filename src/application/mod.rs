//! Application layer services implementing business logic.
//!
//! Services consume the storage trait and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening, resolution and per-user listing
//! - [`services::batch_service::BatchService`] - Batch insertion with aggregated duplicates
//! - [`services::user_token::UserTokenCodec`] - Stateless user identity tokens

pub mod services;
