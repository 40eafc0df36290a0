//! Domain layer: entities and the store contract.
//!
//! - [`entities`] - [`entities::ShortCode`] and [`entities::UrlRecord`]
//! - [`repositories`] - The [`repositories::MappingStore`] trait and its error type
//!
//! Nothing here depends on Redis or HTTP.

pub mod entities;
pub mod repositories;
