//! Repository trait for short URL mapping storage.

use async_trait::async_trait;

use crate::domain::entities::{NewMapping, StoredUrl, UserId};

/// Errors returned by mapping storage backends.
///
/// [`StoreError::Duplicate`] is a data conflict and never a backend failure.
/// Every other variant is fatal for the request that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("short url or long url is already stored")]
    Duplicate,

    #[error("storage file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage document is malformed: {0}")]
    Document(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns true for the recoverable duplicate condition.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate)
    }
}

/// Storage contract shared by the memory, file and PostgreSQL backends.
///
/// All backends enforce the same invariants:
///
/// - `short` is unique across active and deleted mappings and is never reused
/// - `long` is unique across active mappings
/// - every mapping appears exactly once in its owner's index, in insertion order
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`]
/// - [`crate::infrastructure::persistence::FileMappingRepository`]
/// - [`crate::infrastructure::persistence::PgMappingRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Human-readable backend name used in logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Stores a new active mapping owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if `short` was ever stored or `long`
    /// is stored on an active mapping. Nothing is modified in that case.
    ///
    /// Returns any other [`StoreError`] on backend failure.
    async fn put(&self, short: &str, long: &str, owner: UserId) -> Result<(), StoreError>;

    /// Looks up a short code.
    ///
    /// Returns `Ok(None)` only if the code was never stored. Deleted mappings
    /// are returned with `deleted = true`.
    async fn get(&self, short: &str) -> Result<Option<StoredUrl>, StoreError>;

    /// Returns the short codes created by `owner`, oldest first.
    ///
    /// An unknown owner yields an empty list.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<String>, StoreError>;

    /// Stores several mappings for one owner as a single unit.
    ///
    /// Colliding items are skipped and the rest are stored. If anything was
    /// skipped the call returns [`StoreError::Duplicate`] after the
    /// non-colliding items have been persisted.
    async fn put_batch(&self, items: &[NewMapping], owner: UserId) -> Result<(), StoreError>;

    /// Soft-deletes every listed short that is active and owned by `owner`.
    ///
    /// Shorts that are unknown, already deleted or owned by someone else are
    /// skipped silently.
    async fn mark_deleted(&self, owner: UserId, shorts: &[String]) -> Result<(), StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
