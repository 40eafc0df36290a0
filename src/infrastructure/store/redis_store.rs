//! Redis-backed mapping store.

use std::collections::HashMap;

use crate::domain::entities::{ShortCode, UrlRecord};
use crate::domain::repositories::{MappingStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, Script, aio::ConnectionManager};
use tracing::{debug, info};

/// Prefix of the hash holding a code's record (`url:<code>`).
const RECORD_KEY_PREFIX: &str = "url:";

/// Sets the primary mapping only if the code is free and, in the same atomic
/// step, writes the record hash with a zero click count.
///
/// KEYS[1] = code, KEYS[2] = record key, ARGV[1] = destination, ARGV[2] = created_at
const INSERT_IF_ABSENT_SCRIPT: &str = r"
if redis.call('SET', KEYS[1], ARGV[1], 'NX') then
  redis.call('HSET', KEYS[2], 'original_url', ARGV[1], 'created_at', ARGV[2], 'clicks', 0)
  return 1
end
return 0
";

/// Mapping store on top of a Redis `ConnectionManager`.
///
/// The manager multiplexes one connection and reconnects on its own after the
/// initial connect, so the store is cheap to share behind an `Arc`.
pub struct RedisStore {
    conn: ConnectionManager,
    insert_script: Script,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            conn: manager,
            insert_script: Script::new(INSERT_IF_ABSENT_SCRIPT),
        })
    }
}

fn record_key(code: &ShortCode) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, code)
}

/// Splits Redis failures into "cannot reach the store" and everything else.
fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Operation(e.to_string())
    }
}

/// Builds a record from the fields of a `url:<code>` hash.
///
/// Missing numeric fields read as zero; present but unparsable ones are an error.
fn record_from_fields(
    code: &ShortCode,
    mut fields: HashMap<String, String>,
) -> StoreResult<UrlRecord> {
    let destination = fields.remove("original_url").unwrap_or_default();

    let created_at = match fields.get("created_at") {
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            StoreError::Operation(format!("malformed created_at for {}: {:?}", code, raw))
        })?,
        None => 0,
    };

    let clicks = match fields.get("clicks") {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            StoreError::Operation(format!("malformed clicks for {}: {:?}", code, raw))
        })?,
        None => 0,
    };

    Ok(UrlRecord {
        code: code.clone(),
        destination,
        created_at,
        clicks,
    })
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn exists(&self, code: &ShortCode) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists(code.as_str()).await.map_err(map_redis_error)
    }

    async fn insert_if_absent(&self, record: &UrlRecord) -> StoreResult<bool> {
        let mut conn = self.conn.clone();

        let mut invocation = self.insert_script.prepare_invoke();
        invocation
            .key(record.code.as_str())
            .key(record_key(&record.code))
            .arg(&record.destination)
            .arg(record.created_at);

        let inserted: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        debug!(code = %record.code, inserted = inserted == 1, "Redis conditional insert");
        Ok(inserted == 1)
    }

    async fn read_destination(&self, code: &ShortCode) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(code.as_str()).await.map_err(map_redis_error)
    }

    async fn increment_clicks(&self, code: &ShortCode) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let clicks: i64 = conn
            .hincr(record_key(code), "clicks", 1)
            .await
            .map_err(map_redis_error)?;

        u64::try_from(clicks)
            .map_err(|_| StoreError::Operation(format!("negative click count for {}", code)))
    }

    async fn read_record(&self, code: &ShortCode) -> StoreResult<Option<UrlRecord>> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(record_key(code))
            .await
            .map_err(map_redis_error)?;

        if fields.is_empty() {
            return Ok(None);
        }

        record_from_fields(code, fields).map(Some)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.map_err(map_redis_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_record_key_prefix() {
        assert_eq!(record_key(&ShortCode::new("abc123")), "url:abc123");
    }

    #[test]
    fn test_record_from_complete_fields() {
        let code = ShortCode::new("abc123");
        let record = record_from_fields(
            &code,
            fields(&[
                ("original_url", "https://example.com"),
                ("created_at", "1234567890"),
                ("clicks", "7"),
            ]),
        )
        .unwrap();

        assert_eq!(record.destination, "https://example.com");
        assert_eq!(record.created_at, 1_234_567_890);
        assert_eq!(record.clicks, 7);
    }

    #[test]
    fn test_record_missing_numbers_default_to_zero() {
        let code = ShortCode::new("abc123");
        let record =
            record_from_fields(&code, fields(&[("original_url", "https://example.com")])).unwrap();

        assert_eq!(record.created_at, 0);
        assert_eq!(record.clicks, 0);
    }

    #[test]
    fn test_record_malformed_clicks_is_operation_error() {
        let code = ShortCode::new("abc123");
        let result = record_from_fields(&code, fields(&[("clicks", "many")]));

        assert!(matches!(result, Err(StoreError::Operation(_))));
    }

    #[test]
    fn test_insert_script_is_conditional() {
        assert!(INSERT_IF_ABSENT_SCRIPT.contains("'NX'"));
        assert!(INSERT_IF_ABSENT_SCRIPT.contains("'clicks', 0"));
    }
}
