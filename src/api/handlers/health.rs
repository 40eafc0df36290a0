//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns store health.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store connected and answering `PING`
/// - **503 Service Unavailable**: Store never connected, or `PING` failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "redis": "healthy",
///   "redis_ping": "ok",
///   "version": "1.0.0"
/// }
/// ```
///
/// `redis` reflects the startup connection; `redis_ping` is omitted when
/// there was none.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let version = env!("CARGO_PKG_VERSION").to_string();

    if !state.store_connected {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                redis: "unhealthy".to_string(),
                redis_ping: None,
                version,
            }),
        ));
    }

    let ping_ok = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Store ping failed: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if ping_ok { "healthy" } else { "unhealthy" }.to_string(),
        redis: "healthy".to_string(),
        redis_ping: Some(if ping_ok { "ok" } else { "failed" }.to_string()),
        version,
    };

    if ping_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
