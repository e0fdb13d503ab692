#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::application::services::UserTokenCodec;
use shortlink::domain::delete_event::DeleteRequest;
use shortlink::domain::repositories::MappingRepository;
use shortlink::infrastructure::persistence::MemoryMappingRepository;
use shortlink::routes::app_routes;
use shortlink::state::{AppState, DynRepository};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://localhost:8080";
pub const TOKEN_SECRET: &str = "test-user-token-secret";

pub fn token_codec() -> UserTokenCodec {
    UserTokenCodec::new(TOKEN_SECRET)
}

/// Cookie header value identifying `user_id`.
pub fn user_cookie(user_id: u32) -> String {
    format!("user_token={}", token_codec().mint_for(user_id))
}

pub fn create_test_state(
    repository: Arc<DynRepository>,
) -> (AppState, mpsc::Receiver<DeleteRequest>) {
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(repository, BASE_URL, token_codec(), tx);
    (state, rx)
}

/// Full router over a fresh memory backend.
///
/// The delete queue receiver is returned so tests can inspect or drain it.
pub fn memory_server() -> (
    TestServer,
    Arc<MemoryMappingRepository>,
    mpsc::Receiver<DeleteRequest>,
) {
    let repository = Arc::new(MemoryMappingRepository::new());
    let (state, rx) = create_test_state(repository.clone());
    let server = TestServer::new(app_routes(state)).unwrap();
    (server, repository, rx)
}

/// Strips the base URL from a handed-out short URL.
pub fn short_code(short_url: &str) -> &str {
    short_url
        .strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap()
}

pub async fn seed(repository: &dyn MappingRepository, short: &str, long: &str, owner: u32) {
    repository.put(short, long, owner).await.unwrap();
}
