//! HTTP server initialization and runtime setup.
//!
//! Handles the store connection, state wiring, and the Axum server lifecycle.

use crate::config::{Config, mask_connection_string};
use crate::domain::repositories::MappingStore;
use crate::infrastructure::store::{RedisStore, UnavailableStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis store (or [`UnavailableStore`] if every connection attempt fails)
/// - Allocation and redirect services
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (store, store_connected) = connect_store(&config).await;

    let state = AppState::new(store, store_connected, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Delays between startup connection attempts: one per retry, 50 ms doubling
/// up to 5 s, jittered.
fn connect_backoff(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(50)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(retries)
}

/// Connects to Redis: one attempt, then `redis_connect_retries` more with
/// jittered exponential backoff.
///
/// Falls back to [`UnavailableStore`] so the server still starts; store-backed
/// endpoints then answer 503 and `/` reports `redis_connected: false`.
async fn connect_store(config: &Config) -> (Arc<dyn MappingStore>, bool) {
    let strategy = connect_backoff(config.redis_connect_retries);

    let redis_url = config.redis_url.as_str();
    let result = Retry::spawn(strategy, || async move {
        RedisStore::connect(redis_url).await.inspect_err(|e| {
            tracing::warn!("Redis connection attempt failed: {}", e);
        })
    })
    .await;

    match result {
        Ok(store) => {
            tracing::info!("Store enabled (Redis)");
            (Arc::new(store), true)
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to Redis at {}: {}. Store-backed endpoints will return 503.",
                mask_connection_string(&config.redis_url),
                e
            );
            (Arc::new(UnavailableStore::new(e.to_string())), false)
        }
    }
}

/// Resolves when the process receives Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
