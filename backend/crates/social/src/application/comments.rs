//! Comment Use Cases

use std::sync::Arc;

use auth::domain::User;

use crate::application::guard::{load_post, owned_by, parse_comment_id, parse_post_id};
use crate::domain::entity::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::validation::validate_comment;
use crate::error::{SocialError, SocialResult};

pub struct CommentUseCase<S>
where
    S: PostRepository + CommentRepository,
{
    store: Arc<S>,
}

impl<S> CommentUseCase<S>
where
    S: PostRepository + CommentRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        caller: &User,
        raw_post_id: &str,
        text: String,
    ) -> SocialResult<Comment> {
        let post = load_post(self.store.as_ref(), raw_post_id).await?;

        let report = validate_comment(&text);
        if !report.is_ok() {
            return Err(SocialError::Validation(report.into_errors()));
        }

        let comment = Comment::new(post.post_id, caller.user_id, text);
        self.store.create_comment(&comment).await?;

        tracing::info!(
            user_id = %caller.user_id,
            post_id = %post.post_id,
            comment_id = %comment.comment_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// Delete a comment written by the caller
    ///
    /// The post must exist, but the comment is not required to belong to it.
    pub async fn delete(
        &self,
        caller: &User,
        raw_post_id: &str,
        raw_comment_id: &str,
    ) -> SocialResult<Comment> {
        let post_id = parse_post_id(raw_post_id)?;
        let comment_id = parse_comment_id(raw_comment_id)?;

        if self.store.find_post(&post_id).await?.is_none() {
            return Err(SocialError::PostNotFound);
        }

        let comment = self.store.find_comment(&comment_id).await?;
        let comment = owned_by(comment, &caller.user_id, SocialError::CommentNotFound)?;

        if !self.store.delete_comment(&comment.comment_id).await? {
            return Err(SocialError::CommentNotFound);
        }

        tracing::info!(user_id = %caller.user_id, comment_id = %comment.comment_id, "Comment deleted");

        Ok(comment)
    }
}
