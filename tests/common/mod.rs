#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use shortener::config::Config;
use shortener::domain::entities::ShortRecord;
use shortener::domain::repositories::{ShortRepository, StoreError};
use shortener::infrastructure::persistence::InMemoryShortRepository;
use shortener::routes::router;
use shortener::state::AppState;
use std::sync::Arc;

/// Store double that fails every call as if the database were down.
pub struct FailingShortRepository;

#[async_trait]
impl ShortRepository for FailingShortRepository {
    async fn insert(&self, _record: ShortRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _redirect_path: &str) -> Result<ShortRecord, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn create_test_state() -> (AppState, Arc<InMemoryShortRepository>) {
    let repository = Arc::new(InMemoryShortRepository::new());
    (AppState::new(repository.clone()), repository)
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = router(state, &Config::default()).unwrap();
    TestServer::new(app).unwrap()
}

pub fn create_failing_server() -> TestServer {
    create_test_server(AppState::new(Arc::new(FailingShortRepository)))
}

pub fn is_token(token: &str) -> bool {
    token.len() == 7
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
