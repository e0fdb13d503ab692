//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - memory, JSON file and PostgreSQL mapping repositories

pub mod persistence;
