//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/path",
///   "custom_code": "promo2025"
/// }
/// ```
///
/// `custom_code` is optional; an empty string is the same as leaving it out.
///
/// # Response
///
/// ```json
/// {
///   "short_url": "http://localhost:8000/promo2025",
///   "original_url": "https://example.com/very/long/path",
///   "short_code": "promo2025"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the custom code breaks the format rules
/// - 409 if the custom code is taken
/// - 422 if `url` is not an absolute http(s) URL
/// - 500 if no free random code was found or the write failed
/// - 503 if the store is unreachable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let code = state
        .allocation_service
        .allocate(payload.url.clone(), payload.custom_code)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: code.short_url(&state.base_url),
        original_url: payload.url,
        short_code: code.into_inner(),
    }))
}
