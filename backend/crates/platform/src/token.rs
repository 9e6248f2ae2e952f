//! Stateless Bearer Tokens
//!
//! HS256 JSON Web Tokens. There is no server-side session store: a token
//! stays valid while its signature checks out and, when it carries one,
//! its `exp` is in the future.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use jsonwebtoken::errors::Error as TokenError;

/// Signing algorithm for every issued token
const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claims embedded in a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds), absent when tokens do not expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Build claims for `sub` issued at `now`
    ///
    /// ## Arguments
    /// * `ttl_secs` - Lifetime in seconds; `None` issues a non-expiring token
    pub fn new(sub: Uuid, now: i64, ttl_secs: Option<i64>) -> Self {
        Self {
            sub,
            iat: now,
            exp: ttl_secs.map(|ttl| now.saturating_add(ttl)),
        }
    }
}

/// Sign claims into a token string
pub fn issue(secret: &[u8], claims: &TokenClaims) -> Result<String, TokenError> {
    encode(
        &Header::new(TOKEN_ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret),
    )
}

/// Verify a token and return its claims
///
/// ## Arguments
/// * `secret` - Signing secret
/// * `token` - Token as presented by the client
/// * `expiring` - Whether `exp` is required and enforced
pub fn verify(secret: &[u8], token: &str, expiring: bool) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;
    if expiring {
        validation.set_required_spec_claims(&["exp", "sub"]);
    } else {
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub"]);
    }

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn test_issue_and_verify() {
        let sub = Uuid::new_v4();
        let claims = TokenClaims::new(sub, now(), None);
        let token = issue(SECRET, &claims).unwrap();

        let verified = verify(SECRET, &token, false).unwrap();
        assert_eq!(verified.sub, sub);
        assert_eq!(verified.exp, None);
    }

    #[test]
    fn test_no_exp_claim_by_default() {
        let claims = TokenClaims::new(Uuid::new_v4(), 1, None);
        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("exp"));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue(SECRET, &TokenClaims::new(Uuid::new_v4(), now(), None)).unwrap();
        let err = verify(b"another-secret-another-secret-00", &token, false).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_tampered_claims() {
        let token = issue(SECRET, &TokenClaims::new(Uuid::new_v4(), now(), None)).unwrap();
        let other = issue(SECRET, &TokenClaims::new(Uuid::new_v4(), now(), None)).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        let err = verify(SECRET, &forged, false).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_malformed_tokens() {
        for raw in ["", "abc", "a.b", "!!!.???.###"] {
            assert!(verify(SECRET, raw, false).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_expiry() {
        let fresh = issue(SECRET, &TokenClaims::new(Uuid::new_v4(), now(), Some(60))).unwrap();
        assert!(verify(SECRET, &fresh, true).is_ok());

        let stale = TokenClaims::new(Uuid::new_v4(), now() - 120, Some(60));
        let token = issue(SECRET, &stale).unwrap();
        let err = verify(SECRET, &token, true).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn test_expiring_verification_requires_exp() {
        let token = issue(SECRET, &TokenClaims::new(Uuid::new_v4(), now(), None)).unwrap();
        assert!(verify(SECRET, &token, true).is_err());
    }
}
