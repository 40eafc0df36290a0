//! # Shortly
//!
//! A URL shortener that maps short alphanumeric codes to long URLs, redirects
//! visitors, and counts clicks per code, built with Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and the [`domain::repositories::MappingStore`] contract
//! - **Application Layer** ([`application`]) - Code allocation, redirects and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis, in-memory and fallback stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Allocation Protocol
//!
//! Generated codes are 6 random characters from `[A-Za-z0-9]`; custom codes are
//! 3-20 alphanumeric characters and not purely numeric. A code is claimed with a
//! single conditional write, so concurrent requests for the same code cannot
//! overwrite each other.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! export BASE_URL="http://localhost:8000"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AllocationError, AllocationService, RedirectService, ResolveError,
    };
    pub use crate::domain::entities::{ShortCode, UrlRecord};
    pub use crate::domain::repositories::{MappingStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore, UnavailableStore};
    pub use crate::state::AppState;
}
