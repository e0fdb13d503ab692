//! Mapping storage backends.
//!
//! Three interchangeable implementations of
//! [`crate::domain::repositories::MappingRepository`]:
//!
//! - [`MemoryMappingRepository`] - process memory, one exclusive lock
//! - [`FileMappingRepository`] - one JSON document rewritten on every mutation
//! - [`PgMappingRepository`] - PostgreSQL table with unique constraints
//!
//! The memory and file backends share [`document::MappingDocument`], so their
//! uniqueness and ownership rules cannot drift apart.

pub mod document;
pub mod file_mapping_repository;
pub mod memory_mapping_repository;
pub mod pg_mapping_repository;

pub use document::MappingDocument;
pub use file_mapping_repository::FileMappingRepository;
pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
