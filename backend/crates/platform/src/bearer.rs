//! Authorization Header Parsing

use axum::http::{HeaderMap, header};

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(&headers_with("bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer(&headers_with("Bearer   abc ")), Some("abc"));
    }

    #[test]
    fn test_missing_or_malformed() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers_with("Bearer")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers_with("abc.def")), None);
    }
}
