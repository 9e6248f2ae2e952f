//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a user together with its credential (single transaction)
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already used.
    async fn create(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist profile fields, user name and email, and the credential when
    /// one is given, as a single transaction
    ///
    /// Fails with `AuthError::EmailTaken` when the new email is already
    /// used; nothing is written in that case. Follow sets are not written
    /// here; see the social follow repository.
    async fn update_profile(
        &self,
        user: &User,
        credential: Option<&Credential>,
    ) -> AuthResult<()>;

    /// Delete user and credential. Returns false if no such user.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find credential by user ID
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;
}

/// Everything the auth handlers need from one store
pub trait AuthStore: UserRepository + CredentialRepository + Clone + Send + Sync + 'static {}

impl<T> AuthStore for T where T: UserRepository + CredentialRepository + Clone + Send + Sync + 'static {}
