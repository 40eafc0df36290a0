//! Business logic services for the application layer.

pub mod allocation_service;
pub mod redirect_service;

pub use allocation_service::{AllocationError, AllocationService};
pub use redirect_service::{RedirectService, ResolveError};
