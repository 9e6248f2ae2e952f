//! Post Use Cases
//!
//! Create, update, delete, read, like, and the per-user and timeline
//! listings.

use std::sync::Arc;

use auth::domain::{User, UserRepository};
use kernel::id::UserId;

use crate::application::guard::{load_own_post, load_post, load_user, parse_post_id};
use crate::domain::entity::author::distinct_ids;
use crate::domain::entity::{Author, Authors, Comment, LikeChange, Post};
use crate::domain::repository::{AuthorRepository, CommentRepository, PostRepository};
use crate::domain::validation::{validate_new_post, validate_post_update};
use crate::error::{SocialError, SocialResult};

pub struct CreatePostInput {
    pub desc: String,
    pub img: Option<String>,
}

#[derive(Default)]
pub struct UpdatePostInput {
    pub desc: Option<String>,
    pub img: Option<String>,
}

/// A post and its comments (oldest first), with their authors
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub authors: Authors,
}

/// A post listing with the authors of its posts
pub struct PostFeed {
    pub posts: Vec<Post>,
    pub authors: Authors,
}

pub struct PostUseCase<U, S>
where
    U: UserRepository,
    S: PostRepository + CommentRepository + AuthorRepository,
{
    users: Arc<U>,
    store: Arc<S>,
}

impl<U, S> PostUseCase<U, S>
where
    U: UserRepository,
    S: PostRepository + CommentRepository + AuthorRepository,
{
    pub fn new(users: Arc<U>, store: Arc<S>) -> Self {
        Self { users, store }
    }

    pub async fn create(&self, caller: &User, input: CreatePostInput) -> SocialResult<Post> {
        let report = validate_new_post(&input.desc);
        if !report.is_ok() {
            return Err(SocialError::Validation(report.into_errors()));
        }

        let post = Post::new(caller.user_id, input.desc, input.img);
        self.store.create_post(&post).await?;

        tracing::info!(user_id = %caller.user_id, post_id = %post.post_id, "Post created");

        Ok(post)
    }

    pub async fn update(
        &self,
        caller: &User,
        raw_id: &str,
        input: UpdatePostInput,
    ) -> SocialResult<Post> {
        let mut post = load_own_post(self.store.as_ref(), raw_id, &caller.user_id).await?;

        let report = validate_post_update(input.desc.as_deref());
        if !report.is_ok() {
            return Err(SocialError::Validation(report.into_errors()));
        }

        post.apply_update(input.desc, input.img);
        self.store.update_post(&post).await?;

        Ok(post)
    }

    /// Delete a post; its comments are kept
    pub async fn delete(&self, caller: &User, raw_id: &str) -> SocialResult<Post> {
        let post = load_own_post(self.store.as_ref(), raw_id, &caller.user_id).await?;

        if !self.store.delete_post(&post.post_id).await? {
            return Err(SocialError::PostNotFound);
        }

        tracing::info!(user_id = %caller.user_id, post_id = %post.post_id, "Post deleted");

        Ok(post)
    }

    pub async fn get(&self, raw_id: &str) -> SocialResult<PostWithComments> {
        let post = load_post(self.store.as_ref(), raw_id).await?;
        let comments = self.store.find_comments_by_post(&post.post_id).await?;

        let ids = std::iter::once(post.user_id).chain(comments.iter().map(|c| c.user_id));
        let authors = self.load_authors(ids).await?;

        Ok(PostWithComments {
            post,
            comments,
            authors,
        })
    }

    /// Posts by one user, most recent first
    pub async fn user_posts(&self, raw_user_id: &str) -> SocialResult<PostFeed> {
        let user = load_user(self.users.as_ref(), raw_user_id).await?;
        let posts = self.store.find_posts_by_user(&user.user_id).await?;
        let authors = [Author::from(&user)].into_iter().collect();

        Ok(PostFeed { posts, authors })
    }

    /// The caller's own posts plus the posts of everyone the caller follows
    ///
    /// One lookup per followed user; the merged list is stably sorted by
    /// creation time, newest first.
    pub async fn timeline(&self, caller: &User) -> SocialResult<PostFeed> {
        let mut posts = self.store.find_posts_by_user(&caller.user_id).await?;
        for following in &caller.followings {
            posts.extend(self.store.find_posts_by_user(following).await?);
        }
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let authors = self.load_authors(posts.iter().map(|p| p.user_id)).await?;

        Ok(PostFeed { posts, authors })
    }

    pub async fn like(&self, caller: &User, raw_id: &str) -> SocialResult<(Post, LikeChange)> {
        let post_id = parse_post_id(raw_id)?;

        let (post, change) = self
            .store
            .toggle_like(&post_id, &caller.user_id)
            .await?
            .ok_or(SocialError::PostNotFound)?;

        tracing::debug!(user_id = %caller.user_id, post_id = %post_id, change = ?change, "Like toggled");

        Ok((post, change))
    }

    async fn load_authors(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> SocialResult<Authors> {
        let ids = distinct_ids(ids);
        let authors = self.store.find_authors(&ids).await?;
        Ok(authors.into_iter().collect())
    }
}
