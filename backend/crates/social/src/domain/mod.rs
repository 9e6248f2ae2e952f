//! Domain Layer
//!
//! Posts, comments, follow-graph rules, validation and repository traits.

pub mod entity;
pub mod follow;
pub mod repository;
pub mod validation;

// Re-exports
pub use entity::{Author, Authors, Comment, LikeChange, Owned, Post};
pub use follow::{FollowAction, FollowError, FollowOutcome};
pub use repository::{
    AuthorRepository, CommentRepository, FollowChange, FollowRepository, PostRepository,
    SocialStore,
};
