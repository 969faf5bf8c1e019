//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Short link creation is orchestrated by
//! [`crate::application::services::ShortService`].

pub mod entities;
pub mod repositories;
