//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use super::Owned;

/// Result of toggling a like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    Liked,
    Unliked,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    /// Author
    pub user_id: UserId,
    pub desc: String,
    pub img: Option<String>,
    /// Users who liked this post (no duplicates)
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(user_id: UserId, desc: String, img: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            user_id,
            desc,
            img,
            likes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.contains(user_id)
    }

    /// Add or remove `user_id` from `likes`
    pub fn toggle_like(&mut self, user_id: UserId) -> LikeChange {
        let change = if self.is_liked_by(&user_id) {
            self.likes.retain(|id| *id != user_id);
            LikeChange::Unliked
        } else {
            self.likes.push(user_id);
            LikeChange::Liked
        };
        self.updated_at = Utc::now();
        change
    }

    /// Apply a partial update; `None` leaves the field untouched
    pub fn apply_update(&mut self, desc: Option<String>, img: Option<String>) {
        if let Some(desc) = desc {
            self.desc = desc;
        }
        if let Some(img) = img {
            self.img = Some(img);
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Post {
    fn owner(&self) -> &UserId {
        &self.user_id
    }
}
