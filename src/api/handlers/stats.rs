//! Handler for link statistics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the destination, creation time and click count of a code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// Reading stats does not count as a click.
///
/// # Errors
///
/// - 404 if the code is not allocated
/// - 503 if the store is unreachable
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.redirect_service.stats(&code).await?;

    Ok(Json(record.into()))
}
