//! Repository Traits

use auth::domain::User;
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{Author, Comment, LikeChange, Post};
use crate::domain::follow::{FollowAction, FollowOutcome};
use crate::error::SocialResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create_post(&self, post: &Post) -> SocialResult<()>;

    async fn find_post(&self, post_id: &PostId) -> SocialResult<Option<Post>>;

    /// Persist `desc` and `img` (likes are only changed by `toggle_like`)
    async fn update_post(&self, post: &Post) -> SocialResult<()>;

    /// Returns false if no such post
    async fn delete_post(&self, post_id: &PostId) -> SocialResult<bool>;

    /// Posts by `user_id`, most recent first
    async fn find_posts_by_user(&self, user_id: &UserId) -> SocialResult<Vec<Post>>;

    /// Atomically add or remove `user_id` from the post's likes
    ///
    /// Returns `None` if the post does not exist.
    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> SocialResult<Option<(Post, LikeChange)>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> SocialResult<()>;

    async fn find_comment(&self, comment_id: &CommentId) -> SocialResult<Option<Comment>>;

    /// Returns false if no such comment
    async fn delete_comment(&self, comment_id: &CommentId) -> SocialResult<bool>;

    /// Comments on `post_id`, oldest first
    async fn find_comments_by_post(&self, post_id: &PostId) -> SocialResult<Vec<Comment>>;
}

/// Author lookup for listings
#[trait_variant::make(AuthorRepository: Send)]
pub trait LocalAuthorRepository {
    /// Authors for `user_ids` in one query; unknown ids are skipped
    async fn find_authors(&self, user_ids: &[UserId]) -> SocialResult<Vec<Author>>;
}

/// Result of a follow-graph change
#[derive(Debug, Clone)]
pub struct FollowChange {
    pub outcome: FollowOutcome,
    /// Caller after the change
    pub caller: User,
    /// Target after the change
    pub target: User,
}

/// Follow graph repository trait
#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    /// Apply `action` from `caller` to `target`, updating both users as one
    /// unit
    ///
    /// Fails with `UserNotFound` if the target does not exist.
    async fn change_follow(
        &self,
        caller: &UserId,
        target: &UserId,
        action: FollowAction,
    ) -> SocialResult<FollowChange>;
}

/// Everything the social handlers need from one store
pub trait SocialStore:
    PostRepository
    + CommentRepository
    + AuthorRepository
    + FollowRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> SocialStore for T where
    T: PostRepository
        + CommentRepository
        + AuthorRepository
        + FollowRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
