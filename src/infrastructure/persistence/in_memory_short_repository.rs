//! In-memory implementation of the short record repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::ShortRecord;
use crate::domain::repositories::{ShortRepository, StoreError};

/// Process-local store backed by a sharded concurrent map.
///
/// Records do not survive a restart. Used for local runs without PostgreSQL
/// and as a test double for the HTTP layer.
#[derive(Debug, Default)]
pub struct InMemoryShortRepository {
    records: DashMap<String, ShortRecord>,
}

impl InMemoryShortRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ShortRepository for InMemoryShortRepository {
    async fn insert(&self, record: ShortRecord) -> Result<(), StoreError> {
        match self.records.entry(record.redirect_path.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(record.redirect_path)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get(&self, redirect_path: &str) -> Result<ShortRecord, StoreError> {
        self.records
            .get(redirect_path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(redirect_path.to_string()))
    }
}
