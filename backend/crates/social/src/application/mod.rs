//! Application Layer
//!
//! Resource guard and use cases.

pub mod comments;
pub mod follow;
pub mod guard;
pub mod posts;
pub mod profile;

// Re-exports
pub use comments::CommentUseCase;
pub use follow::FollowUseCase;
pub use posts::{CreatePostInput, PostFeed, PostUseCase, PostWithComments, UpdatePostInput};
pub use profile::{ProfileUpdate, ProfileUseCase, UserProfile};
