//! Record store implementations.
//!
//! - [`PgShortRepository`] - PostgreSQL storage (production)
//! - [`InMemoryShortRepository`] - Process-local storage (local runs, tests)

pub mod in_memory_short_repository;
pub mod pg_short_repository;

pub use in_memory_short_repository::InMemoryShortRepository;
pub use pg_short_repository::PgShortRepository;
