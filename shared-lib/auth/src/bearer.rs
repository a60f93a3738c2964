//! Bearer token extraction from `Authorization` header values.

use error::AuthError;

/// The prefix is case-sensitive with exactly one space, per RFC 6750.
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// Returns the exact substring after the `Bearer ` prefix, which must be
/// non-empty. An absent header, a different scheme or an empty remainder
/// all fail the same way.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .ok_or(AuthError::MissingOrMalformedHeader)?
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingOrMalformedHeader)?;

    if token.is_empty() {
        return Err(AuthError::MissingOrMalformedHeader);
    }

    Ok(token)
}
