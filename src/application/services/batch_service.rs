//! Batch shortening coordinator.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewMapping, UserId};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::error::AppError;
use crate::utils::short_code::derive_short;
use crate::utils::url_normalizer::normalize_url;

/// One URL of a batch request, tagged with a caller-chosen correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub correlation_id: String,
    pub long_url: String,
}

impl BatchItem {
    pub fn new(correlation_id: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            long_url: long_url.into(),
        }
    }
}

/// Short code assigned to one correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub correlation_id: String,
    pub short: String,
}

/// Outcome of a batch: one result per request item, in request order.
///
/// `duplicate` is set if any item collided with stored data. Colliding items
/// still carry their derived short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub items: Vec<BatchResult>,
    pub duplicate: bool,
}

/// Applies a set of insertions for one owner as a single storage call.
///
/// Duplicates are tolerated and aggregated; any other storage failure aborts
/// the whole batch.
pub struct BatchService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: MappingRepository + ?Sized> BatchService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Shortens every item of a batch on behalf of `owner`.
    ///
    /// # Validation
    ///
    /// All URLs are validated before storage is touched; one invalid URL
    /// rejects the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any URL is invalid.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn shorten_batch(
        &self,
        items: Vec<BatchItem>,
        owner: UserId,
    ) -> Result<BatchOutcome, AppError> {
        let mut results = Vec::with_capacity(items.len());
        let mut mappings = Vec::with_capacity(items.len());
        let mut seen = HashSet::with_capacity(items.len());

        for item in items {
            let long_url = normalize_url(&item.long_url).map_err(|e| {
                AppError::bad_request(
                    "Invalid URL format",
                    json!({
                        "correlation_id": item.correlation_id,
                        "reason": e.to_string(),
                    }),
                )
            })?;
            let short = derive_short(&long_url);

            if seen.insert(short.clone()) {
                mappings.push(NewMapping::new(short.clone(), long_url));
            }

            results.push(BatchResult {
                correlation_id: item.correlation_id,
                short,
            });
        }

        let duplicate = match self.repository.put_batch(&mappings, owner).await {
            Ok(()) => false,
            Err(StoreError::Duplicate) => true,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            owner,
            items = results.len(),
            stored = mappings.len(),
            duplicate,
            "Batch shortened"
        );

        Ok(BatchOutcome {
            items: results,
            duplicate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;

    #[tokio::test]
    async fn test_batch_returns_short_per_correlation_id() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_put_batch()
            .withf(|items, owner| items.len() == 2 && *owner == 7)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BatchService::new(Arc::new(mock_repo));
        let outcome = service
            .shorten_batch(
                vec![
                    BatchItem::new("c1", "https://a.com"),
                    BatchItem::new("c2", "https://b.com"),
                ],
                7,
            )
            .await
            .unwrap();

        assert!(!outcome.duplicate);
        assert_eq!(outcome.items[0].correlation_id, "c1");
        assert_eq!(outcome.items[0].short, derive_short("https://a.com/"));
        assert_eq!(outcome.items[1].short, derive_short("https://b.com/"));
        assert_ne!(outcome.items[0].short, outcome.items[1].short);
    }

    #[tokio::test]
    async fn test_batch_duplicate_still_returns_every_item() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_put_batch()
            .times(1)
            .returning(|_, _| Err(StoreError::Duplicate));

        let service = BatchService::new(Arc::new(mock_repo));
        let outcome = service
            .shorten_batch(vec![BatchItem::new("c1", "https://a.com")], 7)
            .await
            .unwrap();

        assert!(outcome.duplicate);
        assert_eq!(outcome.items.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_sends_repeated_url_once() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_put_batch()
            .withf(|items, _| items.len() == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BatchService::new(Arc::new(mock_repo));
        let outcome = service
            .shorten_batch(
                vec![
                    BatchItem::new("x", "https://a.com"),
                    BatchItem::new("y", "https://A.com/"),
                ],
                1,
            )
            .await
            .unwrap();

        assert_eq!(outcome.items[0].short, outcome.items[1].short);
    }

    #[tokio::test]
    async fn test_batch_invalid_url_rejects_everything() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_put_batch().times(0);

        let service = BatchService::new(Arc::new(mock_repo));
        let result = service
            .shorten_batch(
                vec![
                    BatchItem::new("ok", "https://a.com"),
                    BatchItem::new("bad", "nope"),
                ],
                1,
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_batch_storage_failure_aborts() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_put_batch()
            .times(1)
            .returning(|_, _| Err(StoreError::Io(std::io::Error::other("boom"))));

        let service = BatchService::new(Arc::new(mock_repo));
        let result = service
            .shorten_batch(vec![BatchItem::new("c1", "https://a.com")], 1)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
