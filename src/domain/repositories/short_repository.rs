//! Repository trait for short record persistence.

use crate::domain::entities::ShortRecord;
use async_trait::async_trait;

/// Failures reported by a record store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with the same redirect path already exists.
    #[error("Short record '{0}' already exists")]
    Conflict(String),

    /// No record matches the requested redirect path.
    #[error("Short record '{0}' not found")]
    NotFound(String),

    /// The store could not be reached or the transaction failed.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

/// Repository interface for short records.
///
/// Records are written once and never modified, so the store only needs to
/// insert and look up by redirect path.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortRepository: Send + Sync {
    /// Persists a new record atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if `redirect_path` is already taken.
    /// Returns [`StoreError::Unavailable`] on connection or transaction failure.
    async fn insert(&self, record: ShortRecord) -> Result<(), StoreError>;

    /// Finds a record by its redirect path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record matches.
    /// Returns [`StoreError::Unavailable`] on connection failure.
    async fn get(&self, redirect_path: &str) -> Result<ShortRecord, StoreError>;
}
