//! Handler for short link creation.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::short::{CreateShortRequest, ShortResponse};
use crate::api::extractors::JsonBody;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /short`
///
/// # Request Body
///
/// ```json
/// { "url": "lucastephens.com/resume.pdf" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "redirect_path": "3f9a0c1",
///   "scheme": "http",
///   "host": "lucastephens.com",
///   "path": "/resume.pdf",
///   "query": "",
///   "fragment": ""
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, an unknown field or an
/// invalid URL.
/// Returns 500 Internal Server Error if the record cannot be stored.
pub async fn create_short_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateShortRequest>,
) -> Result<Json<ShortResponse>, AppError> {
    payload.validate()?;

    let record = state.short_service.create_short(&payload.url).await?;

    tracing::info!(
        redirect_path = %record.redirect_path,
        target = %record.raw_url(),
        "Created short link"
    );

    Ok(Json(record.into()))
}
