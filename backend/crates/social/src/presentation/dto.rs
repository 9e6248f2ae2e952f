//! API DTOs (Data Transfer Objects)

use auth::domain::User;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{CreatePostInput, ProfileUpdate, UpdatePostInput, UserProfile};
use crate::domain::entity::{Author, Authors, Comment, Post};

// ============================================================================
// Requests
// ============================================================================

/// Profile update; only these keys are accepted
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
    pub cover_picture: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub from: Option<String>,
    pub relationship: Option<String>,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            profile_picture: req.profile_picture,
            cover_picture: req.cover_picture,
            bio: req.bio,
            city: req.city,
            from: req.from,
            relationship: req.relationship,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub desc: String,
    pub img: Option<String>,
}

impl From<CreatePostRequest> for CreatePostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            desc: req.desc,
            img: req.img,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostRequest {
    pub desc: Option<String>,
    pub img: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostInput {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            desc: req.desc,
            img: req.img,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Author fields embedded in listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.user_id,
            username: author.user_name.clone(),
            email: author.email.clone(),
            profile_picture: author.profile_picture.clone(),
        }
    }
}

/// The `user` field of a post or comment: a bare id, or the author's
/// summary (`null` once the account is gone)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuthorField {
    Id(UserId),
    Populated(Option<AuthorSummary>),
}

impl AuthorField {
    fn populated(user_id: &UserId, authors: &Authors) -> Self {
        Self::Populated(authors.get(user_id).map(AuthorSummary::from))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub user: AuthorField,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub likes: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id,
            user: AuthorField::Id(post.user_id),
            desc: post.desc,
            img: post.img,
            likes: post.likes,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl PostResponse {
    /// Post with its author embedded
    pub fn with_author(post: Post, authors: &Authors) -> Self {
        let user = AuthorField::populated(&post.user_id, authors);
        Self {
            user,
            ..Self::from(post)
        }
    }
}

pub fn post_list(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

pub fn populated_post_list(posts: Vec<Post>, authors: &Authors) -> Vec<PostResponse> {
    posts
        .into_iter()
        .map(|post| PostResponse::with_author(post, authors))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub user: AuthorField,
    pub post: PostId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id,
            user: AuthorField::Id(comment.user_id),
            post: comment.post_id,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl CommentResponse {
    pub fn with_author(comment: Comment, authors: &Authors) -> Self {
        let user = AuthorField::populated(&comment.user_id, authors);
        Self {
            user,
            ..Self::from(comment)
        }
    }
}

/// A post with its comments inlined
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// A user as seen by other users: no admin flag, no `updatedAt`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub cover_picture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    pub followers: Vec<UserId>,
    pub followings: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub posts: Vec<PostResponse>,
}

impl PublicUserResponse {
    fn new(user: User, posts: Vec<Post>) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            profile_picture: user.profile.profile_picture,
            cover_picture: user.profile.cover_picture,
            bio: user.profile.bio,
            city: user.profile.city,
            from: user.profile.from,
            relationship: user.profile.relationship,
            followers: user.followers,
            followings: user.followings,
            created_at: user.created_at,
            posts: post_list(posts),
        }
    }
}

impl From<UserProfile> for PublicUserResponse {
    fn from(profile: UserProfile) -> Self {
        Self::new(profile.user, profile.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_rejects_unknown_fields() {
        let err = serde_json::from_str::<UpdateUserRequest>(r#"{"isAdmin": true}"#);
        assert!(err.is_err());

        let ok: UpdateUserRequest =
            serde_json::from_str(r#"{"profilePicture": "me.png", "from": "Lyon"}"#).unwrap();
        assert_eq!(ok.profile_picture.as_deref(), Some("me.png"));
        assert_eq!(ok.from.as_deref(), Some("Lyon"));
    }

    #[test]
    fn test_post_detail_flattens_post() {
        let post = Post::new(UserId::new(), "hello".into(), None);
        let comment = Comment::new(post.post_id, UserId::new(), "nice".into());
        let detail = PostDetailResponse {
            post: PostResponse::from(post),
            comments: vec![CommentResponse::from(comment)],
        };
        let json = serde_json::to_value(detail).unwrap();
        assert_eq!(json["desc"], "hello");
        assert_eq!(json["comments"][0]["text"], "nice");
        assert!(json.get("img").is_none());
    }

    #[test]
    fn test_author_field_shapes() {
        let author = Author {
            user_id: UserId::new(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            profile_picture: "a.png".into(),
        };
        let authors: Authors = [author.clone()].into_iter().collect();

        let post = Post::new(author.user_id, "hello".into(), None);
        let bare = serde_json::to_value(PostResponse::from(post.clone())).unwrap();
        assert_eq!(bare["user"], author.user_id.to_string());

        let populated = serde_json::to_value(PostResponse::with_author(post, &authors)).unwrap();
        assert_eq!(populated["user"]["username"], "alice");
        assert_eq!(populated["user"]["profilePicture"], "a.png");
        assert_eq!(populated["user"]["id"], author.user_id.to_string());

        let orphan = Post::new(UserId::new(), "gone".into(), None);
        let json = serde_json::to_value(PostResponse::with_author(orphan, &authors)).unwrap();
        assert!(json["user"].is_null());
    }
}
