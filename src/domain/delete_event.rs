//! Deletion request model for asynchronous soft deletes.

use crate::domain::entities::UserId;

/// A bulk soft-delete request queued by the HTTP layer.
///
/// The handler answers `202 Accepted` once the request is queued; the
/// background worker applies it later. Delete failures are logged by the
/// worker and never reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub owner: UserId,
    pub shorts: Vec<String>,
}

impl DeleteRequest {
    pub fn new(owner: UserId, shorts: Vec<String>) -> Self {
        Self { owner, shorts }
    }

    pub fn is_empty(&self) -> bool {
        self.shorts.is_empty()
    }
}
