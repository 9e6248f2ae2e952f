//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::SocialAppState;
pub use router::{social_router, social_router_generic};
