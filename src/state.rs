//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{BatchService, LinkService, UserTokenCodec};
use crate::domain::delete_event::DeleteRequest;
use crate::domain::repositories::MappingRepository;

/// Storage backend selected at startup.
pub type DynRepository = dyn MappingRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<DynRepository>,
    pub link_service: Arc<LinkService<DynRepository>>,
    pub batch_service: Arc<BatchService<DynRepository>>,
    pub token_codec: Arc<UserTokenCodec>,
    pub delete_sender: mpsc::Sender<DeleteRequest>,
}

impl AppState {
    /// Wires the services around one storage backend.
    pub fn new(
        repository: Arc<DynRepository>,
        base_url: impl Into<String>,
        token_codec: UserTokenCodec,
        delete_sender: mpsc::Sender<DeleteRequest>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository.clone(), base_url)),
            batch_service: Arc::new(BatchService::new(repository.clone())),
            repository,
            token_codec: Arc::new(token_codec),
            delete_sender,
        }
    }
}
