//! Store stand-in used when Redis could not be reached at startup.

use crate::domain::entities::{ShortCode, UrlRecord};
use crate::domain::repositories::{MappingStore, StoreError, StoreResult};
use async_trait::async_trait;
use tracing::debug;

/// A [`MappingStore`] whose every call fails with [`StoreError::Unavailable`].
///
/// Lets the server start and answer `/` and `/health` while Redis is down;
/// store-backed endpoints then respond with 503.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!("Using UnavailableStore ({})", reason);
        Self { reason }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn exists(&self, _code: &ShortCode) -> StoreResult<bool> {
        Err(self.error())
    }

    async fn insert_if_absent(&self, _record: &UrlRecord) -> StoreResult<bool> {
        Err(self.error())
    }

    async fn read_destination(&self, _code: &ShortCode) -> StoreResult<Option<String>> {
        Err(self.error())
    }

    async fn increment_clicks(&self, _code: &ShortCode) -> StoreResult<u64> {
        Err(self.error())
    }

    async fn read_record(&self, _code: &ShortCode) -> StoreResult<Option<UrlRecord>> {
        Err(self.error())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(self.error())
    }
}
