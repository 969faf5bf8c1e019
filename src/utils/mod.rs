//! Helpers for URL processing and token derivation.
//!
//! - [`code_generator`] - Short token derivation
//! - [`url_normalizer`] - URL parsing and canonicalization

pub mod code_generator;
pub mod url_normalizer;
