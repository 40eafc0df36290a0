//! Infrastructure layer for external integrations.
//!
//! Implements the store contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Redis, in-memory and unavailable store backends

pub mod store;
