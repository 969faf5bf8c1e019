//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.

pub mod short_repository;

pub use short_repository::{ShortRepository, StoreError};

#[cfg(test)]
pub use short_repository::MockShortRepository;
