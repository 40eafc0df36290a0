//! Short code generation and validation utilities.
//!
//! Random codes come from the thread-local RNG; custom codes are checked
//! against a fixed set of format rules.

use crate::domain::entities::ShortCode;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Number of characters in a generated code.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Shortest accepted custom code (and shortest code a redirect will look up).
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest accepted custom code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Generates a random short code.
///
/// Each of the 6 characters is drawn uniformly and independently from
/// `[A-Za-z0-9]`. The result is not guaranteed to be unused.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.as_str().len(), 6);
/// ```
pub fn generate_code() -> ShortCode {
    let code: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect();

    ShortCode::new(code)
}

/// Validates a user-supplied custom code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot consist of digits only
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_custom_code("promo2025"));
/// assert!(!is_valid_custom_code("12345"));  // digits only
/// assert!(!is_valid_custom_code("ab"));     // too short
/// ```
pub fn is_valid_custom_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CUSTOM_CODE_LENGTH).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && !code.chars().all(|c| c.is_ascii_digit())
}

/// Checks the looser format a redirect lookup requires.
///
/// Only alphanumeric characters and a minimum length of 3 are enforced, so
/// digit-only and long codes are still looked up.
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() >= MIN_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
