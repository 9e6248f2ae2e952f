//! Token issuance and verification
//!
//! Thin layer over `platform::token` (HS256 JWT) that speaks `UserId` and
//! `AuthError`.

use chrono::Utc;
use kernel::id::UserId;
use platform::token::{self, TokenClaims};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Issue a fresh bearer token for `user_id`
pub fn issue_token(config: &AuthConfig, user_id: &UserId) -> AuthResult<String> {
    let claims = TokenClaims::new(
        user_id.into_uuid(),
        Utc::now().timestamp(),
        config.token_ttl_secs(),
    );

    token::issue(&config.token_secret, &claims).map_err(|e| AuthError::Internal(e.to_string()))
}

/// Verify a bearer token and return the user it was issued to
///
/// Every verification failure maps to `InvalidToken`.
pub fn verify_token(config: &AuthConfig, raw: &str) -> AuthResult<UserId> {
    token::verify(&config.token_secret, raw, config.token_ttl.is_some())
        .map(|claims| UserId::from_uuid(claims.sub))
        .map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AuthError::InvalidToken
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_issue_then_verify() {
        let config = AuthConfig::development();
        let user_id = UserId::new();
        let token = issue_token(&config, &user_id).unwrap();
        assert_eq!(verify_token(&config, &token).unwrap(), user_id);
    }

    #[test]
    fn test_other_secret_rejected() {
        let token = issue_token(&AuthConfig::development(), &UserId::new()).unwrap();
        assert!(matches!(
            verify_token(&AuthConfig::development(), &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let config = AuthConfig::development();
        assert!(matches!(
            verify_token(&config, "garbage"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_ttl_tokens_verify_while_fresh() {
        let config = AuthConfig::development().with_token_ttl(Some(Duration::from_secs(60)));
        let user_id = UserId::new();
        let token = issue_token(&config, &user_id).unwrap();
        assert_eq!(verify_token(&config, &token).unwrap(), user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig::development().with_token_ttl(Some(Duration::from_secs(60)));
        let stale = TokenClaims::new(
            UserId::new().into_uuid(),
            Utc::now().timestamp() - 120,
            Some(60),
        );
        let token = token::issue(&config.token_secret, &stale).unwrap();
        assert!(matches!(
            verify_token(&config, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_non_expiring_token_rejected_once_ttl_enabled() {
        let config = AuthConfig::development();
        let token = issue_token(&config, &UserId::new()).unwrap();
        let expiring = config.with_token_ttl(Some(Duration::from_secs(60)));
        assert!(matches!(
            verify_token(&expiring, &token),
            Err(AuthError::InvalidToken)
        ));
    }
}
