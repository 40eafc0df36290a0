//! DTOs for the root and health check endpoints.

use serde::Serialize;

/// Summary returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub redis_connected: bool,
}

/// Health check response returned by `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub redis: String,

    /// `ok` or `failed`; absent when the store was never connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_ping: Option<String>,

    pub version: String,
}
