//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use super::Owned;

#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    /// Author
    pub user_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, user_id: UserId, text: String) -> Self {
        let now = Utc::now();
        Self {
            comment_id: CommentId::new(),
            post_id,
            user_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}
