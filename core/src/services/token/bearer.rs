//! `Authorization: Bearer <token>` header parsing

/// Authentication scheme accepted in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Extracts the token from a `Bearer <token>` header value.
///
/// The scheme must be exactly `Bearer` followed by a single space; anything
/// else (missing prefix, other scheme, empty token) yields `None`.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if scheme != BEARER_SCHEME || token.is_empty() {
        return None;
    }
    Some(token)
}
