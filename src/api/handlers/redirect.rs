//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `301 Moved Permanently`. `Redirect::permanent` would send 308,
/// so the response is assembled directly.
///
/// # Errors
///
/// - 400 if the code is shorter than 3 characters or not alphanumeric
/// - 404 if the code is not allocated
/// - 503 if the store is unreachable
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.redirect_service.resolve(&code).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, destination)],
    ))
}
