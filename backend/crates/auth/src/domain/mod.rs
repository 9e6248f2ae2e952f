//! Domain Layer
//!
//! Contains entities, value objects, validation and repository traits.

pub mod entity;
pub mod repository;
pub mod validation;
pub mod value_object;

// Re-exports
pub use entity::{Credential, Profile, User};
pub use repository::{AuthStore, CredentialRepository, UserRepository};
