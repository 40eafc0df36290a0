//! Core domain entities.
//!
//! - [`ShortCode`] - The key of a short link
//! - [`UrlRecord`] - The stored mapping plus its click counter

pub mod short_code;
pub mod url_record;

pub use short_code::ShortCode;
pub use url_record::UrlRecord;
