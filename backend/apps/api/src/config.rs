//! Server configuration from the environment

use std::env;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MIN_TOKEN_SECRET_LENGTH;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Everything `main` needs to start the server
pub struct ApiConfig {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let frontend_origins =
            env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());
        let allowed_origins = parse_origins(&frontend_origins);

        Ok(Self {
            database_url,
            port,
            allowed_origins,
            auth: auth_config_from_env()?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let config = match env::var("TOKEN_SECRET") {
        Ok(secret_b64) => {
            let secret = general_purpose::STANDARD
                .decode(secret_b64.trim())
                .context("TOKEN_SECRET must be base64")?;
            if secret.len() < MIN_TOKEN_SECRET_LENGTH {
                bail!("TOKEN_SECRET must decode to at least {MIN_TOKEN_SECRET_LENGTH} bytes");
            }
            AuthConfig::new(secret)
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set, using a random secret (tokens reset on restart)");
            AuthConfig::development()
        }
        Err(_) => bail!("TOKEN_SECRET must be set in production"),
    };

    let ttl = match env::var("TOKEN_TTL_SECS") {
        Ok(raw) => Some(Duration::from_secs(
            raw.parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {raw}"))?,
        )),
        Err(_) => None,
    };

    let pepper = env::var("PASSWORD_PEPPER").ok().map(String::into_bytes);

    Ok(config.with_token_ttl(ttl).with_pepper(pepper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("http://localhost:3000, ,http://127.0.0.1:3000");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "http://127.0.0.1:3000");
    }
}
