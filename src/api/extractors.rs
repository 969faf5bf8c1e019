//! Request extractors with JSON error bodies.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON request body that rejects with [`AppError`] instead of axum's plain
/// text rejections.
///
/// A declared `Content-Type` must be `application/json`; parameters such as
/// `charset` are ignored. A request without `Content-Type` is read as JSON.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::bad_request(
                "Failed to read request body",
                json!({ "reason": e.body_text() }),
            )
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::bad_request("Malformed JSON body", json!({ "reason": e.to_string() }))
        })?;

        Ok(Self(value))
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(());
    };

    let essence = value
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if essence.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            format!("Content-Type must be {JSON_CONTENT_TYPE}"),
            json!({ "content_type": String::from_utf8_lossy(value.as_bytes()) }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_missing_content_type_is_accepted() {
        assert!(check_content_type(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_json_content_type_with_parameters() {
        assert!(check_content_type(&headers("application/json")).is_ok());
        assert!(check_content_type(&headers("application/json; charset=utf-8")).is_ok());
        assert!(check_content_type(&headers("Application/JSON")).is_ok());
    }

    #[test]
    fn test_other_content_types_are_rejected() {
        for content_type in ["text/plain", "application/x-www-form-urlencoded", "application/jsonp"] {
            let err = check_content_type(&headers(content_type)).unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{content_type}");
        }
    }
}
