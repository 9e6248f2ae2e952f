//! Authenticate Use Case
//!
//! Resolves a bearer token to the calling user. One user lookup per call.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::verify_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// ## Arguments
    /// * `bearer` - Token taken from the `Authorization` header, if any
    ///
    /// ## Returns
    /// * `MissingToken` - no usable header
    /// * `InvalidToken` - bad token, or its user has since been deleted
    pub async fn execute(&self, bearer: Option<&str>) -> AuthResult<User> {
        let token = bearer.ok_or(AuthError::MissingToken)?;
        let user_id = verify_token(&self.config, token)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
