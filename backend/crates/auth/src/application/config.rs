//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::crypto::random_bytes;

/// Minimum token signing secret length in bytes
pub const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens
    pub token_secret: Vec<u8>,
    /// Token lifetime; `None` issues tokens without an `exp` claim
    pub token_ttl: Option<Duration>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Create config with the given signing secret and non-expiring tokens
    pub fn new(token_secret: Vec<u8>) -> Self {
        Self {
            token_secret,
            token_ttl: None,
            password_pepper: None,
        }
    }

    /// Create config with a random signing secret
    ///
    /// Tokens do not survive a restart with this config.
    pub fn with_random_secret() -> Self {
        Self::new(random_bytes(MIN_TOKEN_SECRET_LENGTH))
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_token_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper;
        self
    }

    /// Token TTL in whole seconds, saturating
    pub fn token_ttl_secs(&self) -> Option<i64> {
        self.token_ttl
            .map(|ttl| i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_length() {
        let config = AuthConfig::development();
        assert_eq!(config.token_secret.len(), MIN_TOKEN_SECRET_LENGTH);
        assert!(config.token_ttl.is_none());
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_ttl_secs() {
        let config = AuthConfig::development().with_token_ttl(Some(Duration::from_secs(3600)));
        assert_eq!(config.token_ttl_secs(), Some(3600));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new(b"super-secret-super-secret-super!".to_vec())
            .with_pepper(Some(b"pepper".to_vec()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
