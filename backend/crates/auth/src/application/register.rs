//! Register Use Case
//!
//! Creates a new user account and issues its first token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::issue_token;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::validation::validate_register;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword, WEAK_PASSWORD_MESSAGE},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Authenticated user plus a fresh token (register and login)
pub struct AuthOutput {
    pub user: User,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        let report = validate_register(&input.user_name, &input.email, &input.password);
        if !report.is_ok() {
            return Err(AuthError::Validation(report.into_errors()));
        }

        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(vec![e.to_string()]))?;
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(vec![e.to_string()]))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|_| AuthError::Validation(vec![WEAK_PASSWORD_MESSAGE.to_string()]))?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(user_name, email);
        let credential = Credential::new(user.user_id, password_hash);

        // A concurrent registration can still win between the check and the
        // insert; the unique index turns that into EmailTaken as well.
        self.user_repo.create(&user, &credential).await?;

        let token = issue_token(&self.config, &user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(AuthOutput { user, token })
    }
}
