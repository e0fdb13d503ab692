//! In-memory implementation of mapping repository.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::document::MappingDocument;
use crate::domain::entities::{NewMapping, StoredUrl, UserId};
use crate::domain::repositories::{MappingRepository, StoreError};

/// Process-local mapping storage.
///
/// The mapping table and the owner index live behind one exclusive lock, so
/// inserts, batch inserts and deletes are atomic with respect to each other
/// and to reads. State is lost when the instance is dropped.
#[derive(Debug, Default)]
pub struct MemoryMappingRepository {
    state: Mutex<MappingDocument>,
}

impl MemoryMappingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, short: &str, long: &str, owner: UserId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        if !state.insert(short, long, owner) {
            debug!(short, long, "Duplicate mapping rejected");
            return Err(StoreError::Duplicate);
        }

        Ok(())
    }

    async fn get(&self, short: &str) -> Result<Option<StoredUrl>, StoreError> {
        Ok(self.state.lock().await.lookup(short))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<String>, StoreError> {
        Ok(self.state.lock().await.shorts_of(owner))
    }

    async fn put_batch(&self, items: &[NewMapping], owner: UserId) -> Result<(), StoreError> {
        let skipped = self.state.lock().await.insert_batch(items, owner);

        if skipped > 0 {
            debug!(skipped, total = items.len(), "Batch contained duplicates");
            return Err(StoreError::Duplicate);
        }

        Ok(())
    }

    async fn mark_deleted(&self, owner: UserId, shorts: &[String]) -> Result<(), StoreError> {
        let changed = self.state.lock().await.mark_deleted(owner, shorts);
        debug!(owner, changed, requested = shorts.len(), "Marked mappings deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
