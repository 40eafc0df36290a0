//! UrlRecord entity: a short code, its destination and its click counter.

use chrono::{DateTime, Utc};

use super::ShortCode;

/// The stored facts about one short link.
///
/// `created_at` is a unix timestamp in seconds. `clicks` only ever grows, one
/// redirect at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub code: ShortCode,
    pub destination: String,
    pub created_at: i64,
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero click count.
    pub fn new(code: ShortCode, destination: String, created_at: i64) -> Self {
        Self {
            code,
            destination,
            created_at,
            clicks: 0,
        }
    }

    /// Returns the creation time as a UTC datetime, if the timestamp is in range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}
