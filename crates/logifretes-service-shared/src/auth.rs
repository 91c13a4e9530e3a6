//! Bearer-token check.
//!
//! This is a prefix match standing in for a token check. There is no
//! signature verification and no expiry.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::QuoteError;

/// Prefix every accepted token must start with (a JWT header for HS256).
pub const EXPECTED_TOKEN_PREFIX: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

const BEARER_SCHEME: &str = "Bearer ";

/// Check the `Authorization` header against `token_prefix`.
///
/// # Errors
///
/// - [`QuoteError::MissingCredentials`] if the header is absent, not valid
///   header text, or does not use the `Bearer ` scheme
/// - [`QuoteError::InvalidToken`] if the token does not start with `token_prefix`
pub fn authorize(headers: &HeaderMap, token_prefix: &str) -> Result<(), QuoteError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_SCHEME))
        .ok_or(QuoteError::MissingCredentials)?;

    if token.starts_with(token_prefix) {
        Ok(())
    } else {
        Err(QuoteError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = authorize(&HeaderMap::new(), EXPECTED_TOKEN_PREFIX).unwrap_err();
        assert!(matches!(err, QuoteError::MissingCredentials));
    }

    #[test]
    fn test_wrong_scheme_is_unauthorized() {
        for value in ["Basic dXNlcjpwYXNz", "bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9", "Bearer", ""] {
            let err = authorize(&headers_with(value), EXPECTED_TOKEN_PREFIX).unwrap_err();
            assert!(matches!(err, QuoteError::MissingCredentials), "{value}");
        }
    }

    #[test]
    fn test_wrong_prefix_is_invalid_token() {
        let err = authorize(&headers_with("Bearer abc.def.ghi"), EXPECTED_TOKEN_PREFIX).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidToken));
    }

    #[test]
    fn test_empty_token_is_invalid_token() {
        let err = authorize(&headers_with("Bearer "), EXPECTED_TOKEN_PREFIX).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidToken));
    }

    #[test]
    fn test_prefixed_token_is_accepted() {
        let headers = headers_with(
            "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0In0.sig",
        );
        assert!(authorize(&headers, EXPECTED_TOKEN_PREFIX).is_ok());
    }

    #[test]
    fn test_custom_prefix() {
        assert!(authorize(&headers_with("Bearer test-token"), "test-").is_ok());
        assert!(authorize(&headers_with("Bearer prod-token"), "test-").is_err());
    }
}
