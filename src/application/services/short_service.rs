//! Short link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::ShortRecord;
use crate::domain::repositories::ShortRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_short;
use crate::utils::url_normalizer::normalize_url;

/// Service for creating and resolving short links.
///
/// Normalizes the submitted URL, derives a fresh token and hands the record
/// to the injected store. Collisions are not retried: a store conflict is
/// reported to the caller as an internal error.
pub struct ShortService {
    repository: Arc<dyn ShortRepository>,
}

impl ShortService {
    /// Creates a new short service backed by `repository`.
    pub fn new(repository: Arc<dyn ShortRepository>) -> Self {
        Self { repository }
    }

    /// Creates and persists a short link for `raw_url`.
    ///
    /// Every call mints a new token, even for a URL that was shortened before.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL cannot be normalized.
    ///
    /// Returns [`AppError::Internal`] if hashing fails, the token collides
    /// with an existing record, or the store is unavailable.
    pub async fn create_short(&self, raw_url: &str) -> Result<ShortRecord, AppError> {
        let normalized = normalize_url(raw_url)?;
        let record = generate_short(&normalized)?;

        self.repository.insert(record.clone()).await?;

        Ok(record)
    }

    /// Looks up the record for a redirect path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::Internal`] if the store is unavailable.
    pub async fn resolve(&self, redirect_path: &str) -> Result<ShortRecord, AppError> {
        Ok(self.repository.get(redirect_path).await?)
    }
}
