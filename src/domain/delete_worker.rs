//! Background worker applying queued soft deletes.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::domain::delete_event::DeleteRequest;
use crate::domain::repositories::MappingRepository;

/// Drains the delete queue until every sender is dropped.
///
/// Each request is applied with [`MappingRepository::mark_deleted`]. A failed
/// request is logged and dropped; there is no retry and no feedback to the
/// request that enqueued it.
pub async fn run_delete_worker<R>(mut rx: mpsc::Receiver<DeleteRequest>, repository: Arc<R>)
where
    R: MappingRepository + ?Sized,
{
    while let Some(request) = rx.recv().await {
        if request.is_empty() {
            continue;
        }

        debug!(
            owner = request.owner,
            count = request.shorts.len(),
            "Applying delete request"
        );

        if let Err(e) = repository
            .mark_deleted(request.owner, &request.shorts)
            .await
        {
            error!(
                owner = request.owner,
                count = request.shorts.len(),
                backend = repository.backend_name(),
                "Failed to apply delete request: {}",
                e
            );
        }
    }

    info!("Delete worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockMappingRepository, StoreError};

    #[tokio::test]
    async fn test_worker_applies_requests_in_order() {
        let mut mock_repo = MockMappingRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_mark_deleted()
            .withf(|owner, shorts| *owner == 1 && shorts.len() == 1 && shorts[0] == "a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        mock_repo
            .expect_mark_deleted()
            .withf(|owner, shorts| *owner == 2 && shorts.len() == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(DeleteRequest::new(1, vec!["a".to_string()]))
            .await
            .unwrap();
        tx.send(DeleteRequest::new(2, vec!["b".to_string(), "c".to_string()]))
            .await
            .unwrap();
        drop(tx);

        run_delete_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_skips_empty_requests() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_mark_deleted().times(0);

        let (tx, rx) = mpsc::channel(8);
        tx.send(DeleteRequest::new(1, Vec::new())).await.unwrap();
        drop(tx);

        run_delete_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_survives_backend_failure() {
        let mut mock_repo = MockMappingRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo.expect_backend_name().return_const("mock");

        mock_repo
            .expect_mark_deleted()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(StoreError::Io(std::io::Error::other("disk full"))));

        mock_repo
            .expect_mark_deleted()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(DeleteRequest::new(1, vec!["a".to_string()]))
            .await
            .unwrap();
        tx.send(DeleteRequest::new(1, vec!["b".to_string()]))
            .await
            .unwrap();
        drop(tx);

        run_delete_worker(rx, Arc::new(mock_repo)).await;
    }
}
