//! Resource Guard
//!
//! Path ids that do not parse, resources that do not exist and resources
//! the caller does not own all produce the same `NotFound` error.

use auth::domain::{User, UserRepository};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{Owned, Post};
use crate::domain::repository::PostRepository;
use crate::error::{SocialError, SocialResult};

pub fn parse_user_id(raw: &str) -> SocialResult<UserId> {
    UserId::parse_str(raw).map_err(|_| SocialError::UserNotFound)
}

pub fn parse_post_id(raw: &str) -> SocialResult<PostId> {
    PostId::parse_str(raw).map_err(|_| SocialError::PostNotFound)
}

pub fn parse_comment_id(raw: &str) -> SocialResult<CommentId> {
    CommentId::parse_str(raw).map_err(|_| SocialError::CommentNotFound)
}

/// Keep `resource` only if it exists and belongs to `caller`
pub fn owned_by<T: Owned>(
    resource: Option<T>,
    caller: &UserId,
    not_found: SocialError,
) -> SocialResult<T> {
    match resource {
        Some(r) if r.is_owned_by(caller) => Ok(r),
        _ => Err(not_found),
    }
}

/// Parse and load a user
pub async fn load_user<U>(users: &U, raw_id: &str) -> SocialResult<User>
where
    U: UserRepository,
{
    let user_id = parse_user_id(raw_id)?;
    users
        .find_by_id(&user_id)
        .await?
        .ok_or(SocialError::UserNotFound)
}

/// Parse and load a post
pub async fn load_post<P>(posts: &P, raw_id: &str) -> SocialResult<Post>
where
    P: PostRepository,
{
    let post_id = parse_post_id(raw_id)?;
    posts
        .find_post(&post_id)
        .await?
        .ok_or(SocialError::PostNotFound)
}

/// Parse and load a post the caller owns
pub async fn load_own_post<P>(posts: &P, raw_id: &str, caller: &UserId) -> SocialResult<Post>
where
    P: PostRepository,
{
    let post_id = parse_post_id(raw_id)?;
    let post = posts.find_post(&post_id).await?;
    owned_by(post, caller, SocialError::PostNotFound)
}

/// The only user a caller may modify is itself
pub fn require_self(caller: &User, raw_id: &str) -> SocialResult<()> {
    let target = parse_user_id(raw_id)?;
    if target == caller.user_id {
        Ok(())
    } else {
        Err(SocialError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_ids_are_not_found() {
        assert!(matches!(parse_user_id("nope"), Err(SocialError::UserNotFound)));
        assert!(matches!(parse_post_id("123"), Err(SocialError::PostNotFound)));
        assert!(matches!(parse_comment_id(""), Err(SocialError::CommentNotFound)));
    }

    #[test]
    fn test_owned_by() {
        let owner = UserId::new();
        let post = Post::new(owner, "hi".into(), None);

        assert!(owned_by(Some(post.clone()), &owner, SocialError::PostNotFound).is_ok());
        assert!(matches!(
            owned_by(Some(post), &UserId::new(), SocialError::PostNotFound),
            Err(SocialError::PostNotFound)
        ));
        assert!(matches!(
            owned_by(None::<Post>, &owner, SocialError::PostNotFound),
            Err(SocialError::PostNotFound)
        ));
    }
}
