//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its canonical URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// Responds with `301 Moved Permanently`, a `Location` header and a small
/// HTML body linking the target.
///
/// # Errors
///
/// Returns 404 Not Found if the token doesn't exist.
/// Returns 500 Internal Server Error if the store is unavailable.
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, &short).await
}

/// `GET /short`: the creation route shadows `/{short}` for this one path, so
/// the lookup is routed here explicitly.
pub async fn short_path_redirect_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    redirect_to(&state, "short").await
}

async fn redirect_to(state: &AppState, short: &str) -> Result<Response, AppError> {
    let record = state.short_service.resolve(short).await?;
    let target = record.raw_url();

    let location = HeaderValue::from_str(&target).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "redirect_path": short, "reason": e.to_string() }),
        )
    })?;

    tracing::debug!(redirect_path = %short, %target, "Redirecting");

    let body = format!(
        "<a href=\"{}\">Moved Permanently</a>.\n\n",
        escape_html(&target)
    );

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [
            (header::LOCATION, location),
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
        ],
        body,
    )
        .into_response())
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
