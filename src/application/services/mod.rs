//! Business logic services for the application layer.

pub mod short_service;

pub use short_service::ShortService;
