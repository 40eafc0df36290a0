//! Redirect resolution and click statistics.

use std::sync::Arc;

use crate::domain::entities::{ShortCode, UrlRecord};
use crate::domain::repositories::{MappingStore, StoreError};
use crate::utils::code_generator::is_valid_code_format;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons a lookup can fail.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid short code format")]
    InvalidCodeFormat { code: String },

    #[error("Short code not found")]
    CodeNotFound { code: String },

    #[error("Store connection not available")]
    StoreUnavailable(#[source] StoreError),

    #[error("Failed to read from store")]
    StoreReadFailed(#[source] StoreError),
}

impl From<StoreError> for ResolveError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => Self::StoreUnavailable(e),
            StoreError::Operation(_) => Self::StoreReadFailed(e),
        }
    }
}

/// Resolves short codes to destinations and reports click counts.
pub struct RedirectService<S: MappingStore + ?Sized = dyn MappingStore> {
    store: Arc<S>,
}

impl<S: MappingStore + ?Sized> RedirectService<S> {
    /// Creates a new redirect service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the destination for `code` and counts the click.
    ///
    /// The click increment is best effort: if it fails, the failure is logged
    /// and the destination is still returned.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidCodeFormat`] if `code` is shorter than 3 characters
    ///   or not alphanumeric
    /// - [`ResolveError::CodeNotFound`] if no mapping exists
    /// - [`ResolveError::StoreUnavailable`] / [`ResolveError::StoreReadFailed`] on store errors
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        if !is_valid_code_format(code) {
            return Err(ResolveError::InvalidCodeFormat {
                code: code.to_string(),
            });
        }

        let code = ShortCode::new(code);

        let destination = self
            .store
            .read_destination(&code)
            .await?
            .ok_or_else(|| ResolveError::CodeNotFound {
                code: code.to_string(),
            })?;

        self.record_click(&code).await;
        metrics::counter!("shortly_redirects_total").increment(1);

        Ok(destination)
    }

    /// Returns the stored record for `code`, including its click count.
    ///
    /// Read-only; the format of `code` is not checked.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::CodeNotFound`] if no record exists
    /// - [`ResolveError::StoreUnavailable`] / [`ResolveError::StoreReadFailed`] on store errors
    pub async fn stats(&self, code: &str) -> Result<UrlRecord, ResolveError> {
        let code = ShortCode::new(code);

        self.store
            .read_record(&code)
            .await?
            .ok_or_else(|| ResolveError::CodeNotFound {
                code: code.into_inner(),
            })
    }

    async fn record_click(&self, code: &ShortCode) {
        match self.store.increment_clicks(code).await {
            Ok(clicks) => debug!(code = %code, clicks, "Click recorded"),
            Err(e) => {
                metrics::counter!("shortly_click_increment_failures_total").increment(1);
                warn!(code = %code, error = %e, "Failed to record click");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingStore;
    use crate::infrastructure::store::MemoryStore;

    fn stored(code: &str, url: &str, clicks: u64) -> UrlRecord {
        UrlRecord {
            code: ShortCode::new(code),
            destination: url.to_string(),
            created_at: 1_234_567_890,
            clicks,
        }
    }

    #[tokio::test]
    async fn test_resolve_success_counts_click() {
        let mut mock_store = MockMappingStore::new();
        mock_store
            .expect_read_destination()
            .withf(|code| code.as_str() == "abc123")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        mock_store
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(1));

        let service = RedirectService::new(Arc::new(mock_store));

        let url = service.resolve("abc123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_too_short() {
        let mut mock_store = MockMappingStore::new();
        mock_store.expect_read_destination().times(0);

        let service = RedirectService::new(Arc::new(mock_store));

        assert!(matches!(
            service.resolve("ab").await,
            Err(ResolveError::InvalidCodeFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_non_alphanumeric() {
        let service = RedirectService::new(Arc::new(MockMappingStore::new()));

        assert!(matches!(
            service.resolve("a!b").await,
            Err(ResolveError::InvalidCodeFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_accepts_digit_only_code() {
        let mut mock_store = MockMappingStore::new();
        mock_store
            .expect_read_destination()
            .times(1)
            .returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(mock_store));

        assert!(matches!(
            service.resolve("12345").await,
            Err(ResolveError::CodeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_not_found_skips_increment() {
        let mut mock_store = MockMappingStore::new();
        mock_store
            .expect_read_destination()
            .returning(|_| Ok(None));
        mock_store.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_store));

        assert!(matches!(
            service.resolve("missing").await,
            Err(ResolveError::CodeNotFound { code }) if code == "missing"
        ));
    }

    #[tokio::test]
    async fn test_resolve_survives_increment_failure() {
        let mut mock_store = MockMappingStore::new();
        mock_store
            .expect_read_destination()
            .returning(|_| Ok(Some("https://example.com".to_string())));
        mock_store
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(StoreError::Operation("WRONGTYPE".into())));

        let service = RedirectService::new(Arc::new(mock_store));

        assert_eq!(service.resolve("abc123").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_store_errors() {
        let mut unavailable = MockMappingStore::new();
        unavailable
            .expect_read_destination()
            .returning(|_| Err(StoreError::Unavailable("refused".into())));
        let service = RedirectService::new(Arc::new(unavailable));
        assert!(matches!(
            service.resolve("abc123").await,
            Err(ResolveError::StoreUnavailable(_))
        ));

        let mut failing = MockMappingStore::new();
        failing
            .expect_read_destination()
            .returning(|_| Err(StoreError::Operation("WRONGTYPE".into())));
        let service = RedirectService::new(Arc::new(failing));
        assert!(matches!(
            service.resolve("abc123").await,
            Err(ResolveError::StoreReadFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_stats_returns_record() {
        let mut mock_store = MockMappingStore::new();
        mock_store
            .expect_read_record()
            .times(1)
            .returning(|_| Ok(Some(stored("abc123", "https://example.com", 4))));

        let service = RedirectService::new(Arc::new(mock_store));

        let record = service.stats("abc123").await.unwrap();
        assert_eq!(record.destination, "https://example.com");
        assert_eq!(record.created_at, 1_234_567_890);
        assert_eq!(record.clicks, 4);
    }

    #[tokio::test]
    async fn test_stats_never_allocated() {
        let mut mock_store = MockMappingStore::new();
        mock_store.expect_read_record().returning(|_| Ok(None));
        mock_store.expect_increment_clicks().times(0);

        let service = RedirectService::new(Arc::new(mock_store));

        assert!(matches!(
            service.stats("nothere").await,
            Err(ResolveError::CodeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_clicks_match_number_of_resolves() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_if_absent(&UrlRecord::new(
                ShortCode::new("abc123"),
                "https://example.com".to_string(),
                0,
            ))
            .await
            .unwrap();

        let service = RedirectService::new(store);

        assert_eq!(service.stats("abc123").await.unwrap().clicks, 0);
        for _ in 0..5 {
            service.resolve("abc123").await.unwrap();
        }
        assert_eq!(service.stats("abc123").await.unwrap().clicks, 5);
    }
}
