//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortService;
use crate::domain::repositories::ShortRepository;

#[derive(Clone)]
pub struct AppState {
    pub short_service: Arc<ShortService>,
}

impl AppState {
    /// Wires the service layer on top of a record store.
    pub fn new(repository: Arc<dyn ShortRepository>) -> Self {
        Self {
            short_service: Arc::new(ShortService::new(repository)),
        }
    }
}
