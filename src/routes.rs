//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Liveness probe
//! - `GET  /health`    - Service status and version
//! - `POST /short`     - Create a short link
//! - `GET  /{short}`   - Redirect to the stored URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins with credentials
//! - **Timeout** - Requests exceeding the configured limit get `408`
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::http::StatusCode;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Builds the routed application with all middleware except path
/// normalization.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is invalid.
pub fn router(state: AppState, config: &Config) -> Result<Router> {
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_seconds),
    );

    Ok(api::routes::routes()
        .with_state(state)
        .layer(timeout)
        .layer(cors::layer(&config.cors_allowed_origins)?)
        .layer(tracing::layer()))
}

/// Constructs the application service served by [`crate::server::run`].
///
/// Trailing slashes are trimmed before routing, so `/short/` reaches the
/// same handler as `/short`.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router(state, config)?))
}
