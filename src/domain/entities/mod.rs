//! Core domain entities.
//!
//! The service stores exactly one record shape, [`Mapping`]. [`StoredUrl`] is
//! the lookup view returned when resolving a short code, and [`NewMapping`] is
//! the input item of a batch insert.

pub mod mapping;

pub use mapping::{Mapping, NewMapping, StoredUrl, UserId};
