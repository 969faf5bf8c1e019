//! HTTP-facing error type.
//!
//! Every failure reaching a handler is converted into [`AppError`], which
//! renders as a JSON body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;
use crate::utils::code_generator::CodeGenerationError;
use crate::utils::url_normalizer::UrlNormalizationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// `reason` is logged when the response is rendered but never sent to
    /// the client.
    #[error("{message}")]
    Internal {
        message: String,
        details: Value,
        reason: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
            reason: None,
        }
    }

    /// Server-side cause of an internal error, if one was recorded.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AppError::Internal { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal {
                message, details, ..
            } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_error_info();

        if status.is_server_error() {
            tracing::error!(
                error = %error.message,
                details = %error.details,
                reason = self.reason().unwrap_or_default(),
                "request failed"
            );
        } else {
            tracing::debug!(status = status.as_u16(), error = %error.message, "request rejected");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
    }
}

impl From<CodeGenerationError> for AppError {
    fn from(e: CodeGenerationError) -> Self {
        AppError::internal(
            "Failed to generate short link",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(redirect_path) => AppError::not_found(
                "Short link not found",
                json!({ "redirect_path": redirect_path }),
            ),
            StoreError::Conflict(redirect_path) => AppError::internal(
                "Generated short link collides with an existing one",
                json!({ "redirect_path": redirect_path }),
            ),
            StoreError::Unavailable(reason) => AppError::Internal {
                message: "Record store unavailable".to_string(),
                details: json!({}),
                reason: Some(reason),
            },
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_default(),
        )
    }
}
