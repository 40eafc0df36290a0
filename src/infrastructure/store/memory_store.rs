//! In-process mapping store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{ShortCode, UrlRecord};
use crate::domain::repositories::{MappingStore, StoreError, StoreResult};
use async_trait::async_trait;
use tracing::debug;

/// A [`MappingStore`] kept in a `HashMap`.
///
/// Gives the same guarantees as the Redis backend (atomic conditional insert,
/// atomic increment) and is used by tests and local experiments. Data is lost
/// when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<ShortCode, UrlRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<ShortCode, UrlRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn exists(&self, code: &ShortCode) -> StoreResult<bool> {
        Ok(self.records().contains_key(code))
    }

    async fn insert_if_absent(&self, record: &UrlRecord) -> StoreResult<bool> {
        let mut records = self.records();
        if records.contains_key(&record.code) {
            return Ok(false);
        }

        let mut stored = record.clone();
        stored.clicks = 0;
        records.insert(record.code.clone(), stored);
        Ok(true)
    }

    async fn read_destination(&self, code: &ShortCode) -> StoreResult<Option<String>> {
        Ok(self.records().get(code).map(|r| r.destination.clone()))
    }

    async fn increment_clicks(&self, code: &ShortCode) -> StoreResult<u64> {
        let mut records = self.records();
        let record = records
            .get_mut(code)
            .ok_or_else(|| StoreError::Operation(format!("no record for {}", code)))?;

        record.clicks += 1;
        Ok(record.clicks)
    }

    async fn read_record(&self, code: &ShortCode) -> StoreResult<Option<UrlRecord>> {
        Ok(self.records().get(code).cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, url: &str) -> UrlRecord {
        UrlRecord::new(ShortCode::new(code), url.to_string(), 1_700_000_000)
    }

    #[tokio::test]
    async fn test_insert_then_read() {
        let store = MemoryStore::new();

        assert!(store.insert_if_absent(&record("abc", "https://a.com")).await.unwrap());
        assert!(store.exists(&ShortCode::new("abc")).await.unwrap());
        assert_eq!(
            store.read_destination(&ShortCode::new("abc")).await.unwrap(),
            Some("https://a.com".to_string())
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_does_not_overwrite() {
        let store = MemoryStore::new();

        assert!(store.insert_if_absent(&record("abc", "https://a.com")).await.unwrap());
        assert!(!store.insert_if_absent(&record("abc", "https://b.com")).await.unwrap());

        let stored = store.read_record(&ShortCode::new("abc")).await.unwrap().unwrap();
        assert_eq!(stored.destination, "https://a.com");
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let store = MemoryStore::new();
        store.insert_if_absent(&record("abc", "https://a.com")).await.unwrap();

        let code = ShortCode::new("abc");
        assert_eq!(store.increment_clicks(&code).await.unwrap(), 1);
        assert_eq!(store.increment_clicks(&code).await.unwrap(), 2);
        assert_eq!(store.read_record(&code).await.unwrap().unwrap().clicks, 2);
    }

    #[tokio::test]
    async fn test_increment_unknown_code_fails() {
        let store = MemoryStore::new();
        let result = store.increment_clicks(&ShortCode::new("nope")).await;
        assert!(matches!(result, Err(StoreError::Operation(_))));
    }

    #[tokio::test]
    async fn test_missing_code_reads_none() {
        let store = MemoryStore::new();
        let code = ShortCode::new("missing");

        assert!(!store.exists(&code).await.unwrap());
        assert!(store.read_destination(&code).await.unwrap().is_none());
        assert!(store.read_record(&code).await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
