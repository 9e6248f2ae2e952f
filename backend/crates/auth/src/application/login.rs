//! Login Use Case
//!
//! Verifies email + password and issues a token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::AuthOutput;
use crate::application::token::issue_token;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::validation::validate_login;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> LoginUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let report = validate_login(&input.email, &input.password);
        if !report.is_ok() {
            return Err(AuthError::Validation(report.into_errors()));
        }

        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credential = self
            .credential_repo
            .find_credential(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("No credential for user {}", user.user_id)))?;

        let raw_password = RawPassword::for_verification(input.password);
        if !credential
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(&self.config, &user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput { user, token })
    }
}
