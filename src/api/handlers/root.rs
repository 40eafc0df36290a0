//! Handler for the service summary endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::RootResponse;
use crate::state::AppState;

/// Returns a short banner with the version and store connection flag.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Shortly is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        redis_connected: state.store_connected,
    })
}
