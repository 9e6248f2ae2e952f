//! Social Backend Module
//!
//! Profiles, follow graph, posts, likes and comments. Callers are
//! authenticated by the `auth` crate's `require_auth` middleware.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, follow rules, validation, repository traits
//! - `application/` - Resource guard and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{SocialError, SocialResult};
pub use infra::postgres::PgSocialRepository;
pub use presentation::router::{social_router, social_router_generic};
