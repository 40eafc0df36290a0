//! Short code allocation service.

use std::sync::Arc;

use crate::domain::entities::{ShortCode, UrlRecord};
use crate::domain::repositories::{MappingStore, StoreError};
use crate::utils::code_generator::{generate_code, is_valid_custom_code};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of random candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Reasons an allocation can fail.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Custom code must be 3-20 alphanumeric characters and not purely numeric")]
    InvalidCustomCode { code: String },

    #[error("Custom code already exists")]
    CodeAlreadyExists { code: String },

    #[error("Unable to generate unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Store connection not available")]
    StoreUnavailable(#[source] StoreError),

    #[error("Failed to store URL")]
    StoreWriteFailed(#[source] StoreError),
}

impl From<StoreError> for AllocationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => Self::StoreUnavailable(e),
            StoreError::Operation(_) => Self::StoreWriteFailed(e),
        }
    }
}

/// Allocates short codes for destination URLs.
///
/// Every allocation goes through [`MappingStore::insert_if_absent`], so the
/// store alone decides whether a code is free. Two concurrent requests for
/// the same code get exactly one success and one [`AllocationError::CodeAlreadyExists`].
pub struct AllocationService<S: MappingStore + ?Sized = dyn MappingStore> {
    store: Arc<S>,
}

impl<S: MappingStore + ?Sized> AllocationService<S> {
    /// Creates a new allocation service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Allocates a code for `destination`.
    ///
    /// # Arguments
    ///
    /// - `destination` - The already-validated URL to shorten
    /// - `custom_code` - Optional caller-chosen code; an empty string counts as absent
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidCustomCode`] if the custom code breaks the format rules
    /// - [`AllocationError::CodeAlreadyExists`] if the custom code is taken
    /// - [`AllocationError::GenerationExhausted`] if every random candidate was taken
    /// - [`AllocationError::StoreUnavailable`] / [`AllocationError::StoreWriteFailed`] on store errors
    pub async fn allocate(
        &self,
        destination: String,
        custom_code: Option<String>,
    ) -> Result<ShortCode, AllocationError> {
        let created_at = Utc::now().timestamp();

        let code = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => self.allocate_custom(destination, custom, created_at).await?,
            None => self.allocate_generated(destination, created_at).await?,
        };

        metrics::counter!("shortly_links_created_total").increment(1);
        info!(code = %code, "Short link created");

        Ok(code)
    }

    async fn allocate_custom(
        &self,
        destination: String,
        custom: String,
        created_at: i64,
    ) -> Result<ShortCode, AllocationError> {
        if !is_valid_custom_code(&custom) {
            return Err(AllocationError::InvalidCustomCode { code: custom });
        }

        let record = UrlRecord::new(ShortCode::new(custom), destination, created_at);

        if self.store.insert_if_absent(&record).await? {
            Ok(record.code)
        } else {
            debug!(code = %record.code, "Custom code already taken");
            Err(AllocationError::CodeAlreadyExists {
                code: record.code.into_inner(),
            })
        }
    }

    /// Tries up to [`MAX_GENERATION_ATTEMPTS`] random codes.
    async fn allocate_generated(
        &self,
        destination: String,
        created_at: i64,
    ) -> Result<ShortCode, AllocationError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let record = UrlRecord::new(generate_code(), destination.clone(), created_at);

            if self.store.insert_if_absent(&record).await? {
                return Ok(record.code);
            }

            debug!(code = %record.code, attempt, "Generated code collided");
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Giving up on random code generation"
        );
        Err(AllocationError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
