//! Entities

pub mod author;
pub mod comment;
pub mod post;

pub use author::{Author, Authors};
pub use comment::Comment;
pub use post::{LikeChange, Post};

use kernel::id::UserId;

/// A record that belongs to exactly one user
pub trait Owned {
    fn owner(&self) -> &UserId;

    fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner() == user_id
    }
}

impl Owned for auth::domain::User {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}
