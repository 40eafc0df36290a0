//! Store trait for short code mappings and click counters.

use crate::domain::entities::{ShortCode, UrlRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`MappingStore`].
///
/// A missing key is never an error: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store was reachable but the command failed or returned malformed data.
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The narrow set of key-value operations the services need.
///
/// Implementations must be safe to share between concurrently running
/// request handlers. Each call is a single round trip; no operation spans
/// more than one key unless it says so.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis backend
/// - [`crate::infrastructure::store::MemoryStore`] - In-process map for tests
/// - [`crate::infrastructure::store::UnavailableStore`] - Always unreachable
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Returns whether a mapping exists for `code`.
    async fn exists(&self, code: &ShortCode) -> StoreResult<bool>;

    /// Writes the mapping and its record only if `record.code` is free.
    ///
    /// Both facets are written together or not at all. Returns `Ok(false)`
    /// when the code is already taken; nothing is overwritten in that case.
    async fn insert_if_absent(&self, record: &UrlRecord) -> StoreResult<bool>;

    /// Reads the destination URL for `code`.
    async fn read_destination(&self, code: &ShortCode) -> StoreResult<Option<String>>;

    /// Atomically increments the click counter by one and returns the new count.
    async fn increment_clicks(&self, code: &ShortCode) -> StoreResult<u64>;

    /// Reads the full record for `code`.
    async fn read_record(&self, code: &ShortCode) -> StoreResult<Option<UrlRecord>>;

    /// Round-trips to the store to check connectivity.
    async fn ping(&self) -> StoreResult<()>;
}
