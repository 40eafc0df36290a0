//! API route configuration.

use crate::api::handlers::{
    health_handler, redirect_handler, root_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `GET  /`              - Service summary
/// - `GET  /health`        - Store health check
/// - `POST /shorten`       - Create a short link
/// - `GET  /stats/{code}`  - Click statistics for a code
/// - `GET  /{code}`        - Redirect to the destination
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/{code}", get(redirect_handler))
}
