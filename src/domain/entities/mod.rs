//! Core domain entities.
//!
//! Entities are plain data structures without infrastructure concerns.
//!
//! - [`ShortRecord`] - A short token and the URL components it resolves to

pub mod short;

pub use short::{ShortRecord, canonical_url};
