//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the identity guard.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{CurrentUser, require_auth};
pub use router::{auth_router, auth_router_generic};
