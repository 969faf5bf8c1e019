//! Handlers for liveness and health endpoints.

use axum::{Json, http::StatusCode};

use crate::api::dto::health::HealthResponse;

/// Liveness probe.
///
/// `GET /` answers `200 OK` with an empty body.
pub async fn root_handler() -> StatusCode {
    StatusCode::OK
}

/// Returns service status and version.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
