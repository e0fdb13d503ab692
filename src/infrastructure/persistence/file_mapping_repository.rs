//! JSON file implementation of mapping repository.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::document::MappingDocument;
use crate::domain::entities::{NewMapping, StoredUrl, UserId};
use crate::domain::repositories::{MappingRepository, StoreError};

/// Mapping storage persisted as a single JSON document.
///
/// Every operation loads the whole document, applies its change and, for
/// mutations, writes the document to a temporary sibling file which is then
/// renamed over the original. An in-process mutex serialises operations so
/// concurrent requests never interleave their read-modify-write cycles.
///
/// # Single Writer
///
/// Nothing coordinates separate processes. Two processes sharing one file
/// will lose each other's updates.
#[derive(Debug)]
pub struct FileMappingRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileMappingRepository {
    /// Creates a repository backed by `path`.
    ///
    /// The file is created on the first write. A missing or empty file reads
    /// as an empty document.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<MappingDocument, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(MappingDocument::new()),
            Err(e) => {
                error!(path = %self.path.display(), "Failed to read storage file: {}", e);
                return Err(e.into());
            }
        };

        MappingDocument::from_json(&raw).map_err(|e| {
            error!(path = %self.path.display(), "Failed to parse storage file: {}", e);
            e.into()
        })
    }

    async fn store(&self, document: &MappingDocument) -> Result<(), StoreError> {
        let payload = document.to_json()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = temp_path_for(&self.path);
        tokio::fs::write(&temp_path, payload).await.map_err(|e| {
            error!(path = %temp_path.display(), "Failed to write storage file: {}", e);
            e
        })?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }

    /// Runs one locked load-mutate-store cycle.
    async fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut MappingDocument) -> T,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;

        let mut document = self.load().await?;
        let result = operation(&mut document);
        self.store(&document).await?;

        Ok(result)
    }

    async fn read<T>(&self, operation: impl FnOnce(&MappingDocument) -> T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(operation(&document))
    }
}

/// Sibling of `path` the next document is written to before the rename.
///
/// Appends to the whole file name, so it never equals `path` and differs for
/// every distinct storage file in a directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl MappingRepository for FileMappingRepository {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn put(&self, short: &str, long: &str, owner: UserId) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut document = self.load().await?;
        if !document.insert(short, long, owner) {
            debug!(short, long, "Duplicate mapping rejected");
            return Err(StoreError::Duplicate);
        }

        self.store(&document).await
    }

    async fn get(&self, short: &str) -> Result<Option<StoredUrl>, StoreError> {
        self.read(|document| document.lookup(short)).await
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<String>, StoreError> {
        self.read(|document| document.shorts_of(owner)).await
    }

    async fn put_batch(&self, items: &[NewMapping], owner: UserId) -> Result<(), StoreError> {
        let skipped = self
            .mutate(|document| document.insert_batch(items, owner))
            .await?;

        if skipped > 0 {
            debug!(skipped, total = items.len(), "Batch contained duplicates");
            return Err(StoreError::Duplicate);
        }

        Ok(())
    }

    async fn mark_deleted(&self, owner: UserId, shorts: &[String]) -> Result<(), StoreError> {
        let changed = self
            .mutate(|document| document.mark_deleted(owner, shorts))
            .await?;
        debug!(owner, changed, requested = shorts.len(), "Marked mappings deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read(|_| ()).await
    }
}
