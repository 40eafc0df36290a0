//! DTOs for link statistics.

use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Click statistics for a short code.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    pub clicks: u64,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.code.into_inner(),
            original_url: record.destination,
            created_at: record.created_at,
            clicks: record.clicks,
        }
    }
}
