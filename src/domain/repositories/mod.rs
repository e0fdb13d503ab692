//! Repository trait definitions for the domain layer.
//!
//! The storage layer is a single capability set, [`MappingRepository`],
//! implemented by three interchangeable backends in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Testing
//!
//! See `tests/repository_contract.rs` and `tests/repository_pg.rs`.

pub mod mapping_repository;

pub use mapping_repository::{MappingRepository, StoreError};

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
