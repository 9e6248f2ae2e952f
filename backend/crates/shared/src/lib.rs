//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary shared by
//! the `auth` and `social` contexts:
//! - Common error type, error kinds and the failure envelope
//! - Typed UUID identifiers for users, posts and comments
//! - The `{ message, payload }` success envelope
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;
