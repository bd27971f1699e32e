//! Bearer token extraction.
//!
//! Extraction is kept behind [`BearerTokenExtractor`] so the verifier never
//! sees a framework request type.

use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Pulls the raw bearer token out of some request representation.
pub trait BearerTokenExtractor<R: ?Sized> {
    /// Returns the token, or `None` if the request carries no usable bearer token.
    fn extract_bearer_token<'r>(&self, request: &'r R) -> Option<&'r str>;
}

/// Reads the token from an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationHeader;

impl BearerTokenExtractor<HeaderMap> for AuthorizationHeader {
    fn extract_bearer_token<'r>(&self, headers: &'r HeaderMap) -> Option<&'r str> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        parse_bearer(value)
    }
}

/// Parse an `Authorization` header value of the form `Bearer <token>`.
///
/// The scheme is matched case-insensitively. The token must be a single
/// non-empty run of non-whitespace characters.
#[must_use]
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, rest) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = rest.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}
