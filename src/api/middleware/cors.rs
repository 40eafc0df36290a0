//! Cross-origin access for browser front-ends.

use tower_http::cors::{Any, CorsLayer};

/// Allows any origin, method and header.
///
/// The service carries no credentials or cookies, so a wildcard policy lets
/// a separately hosted front-end call `/shorten` and `/stats/{code}`.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
