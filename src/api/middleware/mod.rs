//! HTTP middleware for request processing.
//!
//! Provides caller identity, body compression, and observability middleware.

pub mod compression;
pub mod tracing;
pub mod user_token;

pub use user_token::CurrentUser;
