//! Utility functions for short code derivation and URL processing.
//!
//! - [`short_code`] - Deterministic short code derivation
//! - [`url_normalizer`] - URL validation and normalization

pub mod short_code;
pub mod url_normalizer;
