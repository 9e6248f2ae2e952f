//! Profile Use Cases
//!
//! Get, update and delete a user account.

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::value_object::user_password::WEAK_PASSWORD_MESSAGE;
use auth::domain::value_object::{Email, RawPassword, UserName, UserPassword};
use auth::domain::{AuthStore, Credential, User};
use auth::error::AuthError;

use crate::application::guard::{load_user, require_self};
use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::domain::validation::{ProfileFields, validate_profile_update};
use crate::error::{SocialError, SocialResult};

/// A user together with their posts (most recent first)
pub struct UserProfile {
    pub user: User,
    pub posts: Vec<Post>,
}

/// Whitelisted profile update; `None` leaves a field unchanged
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
    pub cover_picture: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub from: Option<String>,
    pub relationship: Option<String>,
}

impl ProfileUpdate {
    fn fields(&self) -> ProfileFields<'_> {
        ProfileFields {
            username: self.username.as_deref(),
            email: self.email.as_deref(),
            password: self.password.as_deref(),
            bio: self.bio.as_deref(),
            city: self.city.as_deref(),
            from: self.from.as_deref(),
            relationship: self.relationship.as_deref(),
        }
    }
}

pub struct ProfileUseCase<U, P>
where
    U: AuthStore,
    P: PostRepository,
{
    users: Arc<U>,
    posts: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, P> ProfileUseCase<U, P>
where
    U: AuthStore,
    P: PostRepository,
{
    pub fn new(users: Arc<U>, posts: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            posts,
            config,
        }
    }

    pub async fn get(&self, raw_id: &str) -> SocialResult<UserProfile> {
        let user = load_user(self.users.as_ref(), raw_id).await?;
        let posts = self.posts.find_posts_by_user(&user.user_id).await?;

        Ok(UserProfile { user, posts })
    }

    pub async fn update(
        &self,
        caller: &User,
        raw_id: &str,
        input: ProfileUpdate,
    ) -> SocialResult<User> {
        require_self(caller, raw_id)?;

        let report = validate_profile_update(&input.fields());
        if !report.is_ok() {
            return Err(SocialError::Validation(report.into_errors()));
        }

        let mut user = caller.clone();

        if let Some(raw) = input.username {
            user.user_name =
                UserName::new(&raw).map_err(|e| SocialError::Validation(vec![e.to_string()]))?;
        }
        if let Some(raw) = input.email {
            let email =
                Email::new(&raw).map_err(|e| SocialError::Validation(vec![e.to_string()]))?;
            if email != user.email && self.users.exists_by_email(&email).await? {
                return Err(AuthError::EmailTaken.into());
            }
            user.email = email;
        }
        if let Some(v) = input.profile_picture {
            user.profile.profile_picture = v;
        }
        if let Some(v) = input.cover_picture {
            user.profile.cover_picture = v;
        }
        if input.bio.is_some() {
            user.profile.bio = input.bio;
        }
        if input.city.is_some() {
            user.profile.city = input.city;
        }
        if input.from.is_some() {
            user.profile.from = input.from;
        }
        if input.relationship.is_some() {
            user.profile.relationship = input.relationship;
        }
        user.touch();

        let credential = match input.password {
            Some(raw) => Some(self.rehash_password(&user, raw).await?),
            None => None,
        };

        // Profile row and credential commit together or not at all
        self.users.update_profile(&user, credential.as_ref()).await?;

        if credential.is_some() {
            tracing::info!(user_id = %user.user_id, "Password changed");
        }
        tracing::info!(user_id = %user.user_id, "User profile updated");

        Ok(user)
    }

    /// Build the replacement credential; nothing is written here
    async fn rehash_password(&self, user: &User, raw: String) -> SocialResult<Credential> {
        let raw = RawPassword::new(raw)
            .map_err(|_| SocialError::Validation(vec![WEAK_PASSWORD_MESSAGE.to_string()]))?;
        let hash = UserPassword::from_raw(&raw, self.config.pepper())?;

        let mut credential = self
            .users
            .find_credential(&user.user_id)
            .await?
            .ok_or_else(|| SocialError::Internal("Credential missing for user".to_string()))?;
        credential.update_password(hash);

        Ok(credential)
    }

    pub async fn delete(&self, caller: &User, raw_id: &str) -> SocialResult<()> {
        require_self(caller, raw_id)?;

        if !self.users.delete(&caller.user_id).await? {
            return Err(SocialError::UserNotFound);
        }

        tracing::info!(user_id = %caller.user_id, "User deleted");
        Ok(())
    }
}
