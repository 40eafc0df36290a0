//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::MappingStore`] trait and
//! expose typed errors that the HTTP layer maps onto status codes.
//!
//! # Available Services
//!
//! - [`services::allocation_service::AllocationService`] - Random and custom code allocation
//! - [`services::redirect_service::RedirectService`] - Redirect lookups and click statistics

pub mod services;
