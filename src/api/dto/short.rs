//! DTOs for short link creation.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::ShortRecord;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateShortRequest {
    /// The URL to shorten. `http://` is assumed when no scheme is given.
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub url: String,
}

/// A stored short link as returned to clients.
///
/// Absent optional components serialize as `""`, so every key is always
/// present.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortResponse {
    pub redirect_path: String,
    pub scheme: String,
    pub host: String,
    #[serde_as(as = "NoneAsEmptyString")]
    pub path: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub query: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub fragment: Option<String>,
}

impl From<ShortRecord> for ShortResponse {
    fn from(record: ShortRecord) -> Self {
        Self {
            redirect_path: record.redirect_path,
            scheme: record.scheme,
            host: record.host,
            path: record.path,
            query: record.query,
            fragment: record.fragment,
        }
    }
}
