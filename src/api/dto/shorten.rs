//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,

    /// Optional custom short code; format rules are enforced by the allocation service.
    pub custom_code: Option<String>,
}

/// Response for a successfully shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_code: String,
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ValidationError::new("url").with_message("Invalid URL format".into())),
    }
}
