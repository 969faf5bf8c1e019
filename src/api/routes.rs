//! API route configuration.

use crate::api::handlers::{
    create_short_handler, health_handler, redirect_handler, root_handler,
    short_path_redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET  /`          - Liveness probe
/// - `GET  /health`    - Service status and version
/// - `POST /short`     - Create a short link
/// - `GET  /{short}`   - Redirect to the stored URL (`/short` included)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/short",
            post(create_short_handler).get(short_path_redirect_handler),
        )
        .route("/{short}", get(redirect_handler))
}
