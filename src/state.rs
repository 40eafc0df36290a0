//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AllocationService, RedirectService};
use crate::domain::repositories::MappingStore;

/// Cheaply clonable handle to the services and the store.
///
/// The store is built once at startup and passed in explicitly, so tests can
/// swap in [`crate::infrastructure::store::MemoryStore`] or any other backend.
#[derive(Clone)]
pub struct AppState {
    pub allocation_service: Arc<AllocationService>,
    pub redirect_service: Arc<RedirectService>,
    pub store: Arc<dyn MappingStore>,
    /// Whether the store was reached at startup.
    pub store_connected: bool,
    /// Prefix used to build the `short_url` returned by `/shorten`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn MappingStore>,
        store_connected: bool,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            allocation_service: Arc::new(AllocationService::new(store.clone())),
            redirect_service: Arc::new(RedirectService::new(store.clone())),
            store,
            store_connected,
            base_url: base_url.into(),
        }
    }
}
