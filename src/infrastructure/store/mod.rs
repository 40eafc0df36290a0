//! Mapping store backends.
//!
//! Provides three [`crate::domain::repositories::MappingStore`] implementations:
//! - [`RedisStore`] - Production Redis backend
//! - [`MemoryStore`] - In-process map for tests and local runs
//! - [`UnavailableStore`] - Fallback when Redis is unreachable at startup

mod memory_store;
mod redis_store;
mod unavailable_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use unavailable_store::UnavailableStore;
