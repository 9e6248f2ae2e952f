//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, validation, repository traits
//! - `application/` - Use cases and token handling
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity guard
//!
//! ## Features
//! - Register / login with email + password
//! - Stateless bearer tokens (HS256 JWT, optional expiry)
//! - `require_auth` middleware resolving the caller for other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Password hashes stored in a separate table and never serialized

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
