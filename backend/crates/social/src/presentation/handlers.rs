//! HTTP Handlers
//!
//! Every route here sits behind `require_auth`, so `CurrentUser` is always
//! present. Path ids arrive as raw strings; the resource guard parses them.

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::AuthStore;
use auth::middleware::CurrentUser;
use auth::models::UserResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use kernel::response::ApiResponse;

use crate::application::{CommentUseCase, FollowUseCase, PostUseCase, ProfileUseCase};
use crate::domain::entity::{Author, Authors, LikeChange};
use crate::domain::follow::{FollowAction, FollowOutcome};
use crate::domain::repository::SocialStore;
use crate::error::SocialResult;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, PostDetailResponse, PostResponse,
    PublicUserResponse, UpdatePostRequest, UpdateUserRequest, populated_post_list,
};

/// Shared state for social handlers
#[derive(Clone)]
pub struct SocialAppState<A, S>
where
    A: AuthStore,
    S: SocialStore,
{
    pub users: Arc<A>,
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<A, S> SocialAppState<A, S>
where
    A: AuthStore,
    S: SocialStore,
{
    fn profiles(&self) -> ProfileUseCase<A, S> {
        ProfileUseCase::new(self.users.clone(), self.store.clone(), self.config.clone())
    }

    fn posts(&self) -> PostUseCase<A, S> {
        PostUseCase::new(self.users.clone(), self.store.clone())
    }
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/users/{user_id}
pub async fn get_user<A, S>(
    State(state): State<SocialAppState<A, S>>,
    Path(user_id): Path<String>,
) -> SocialResult<ApiResponse<PublicUserResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let profile = state.profiles().get(&user_id).await?;
    Ok(ApiResponse::ok("User got successfully.", profile.into()))
}

/// PATCH /api/v1/users/{user_id}
pub async fn update_user<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> SocialResult<ApiResponse<UserResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let Json(req) = payload?;
    let user = state.profiles().update(&caller, &user_id, req.into()).await?;

    Ok(ApiResponse::ok(
        "Account has been updated successfully.",
        UserResponse::from(&user),
    ))
}

/// DELETE /api/v1/users/{user_id}
pub async fn delete_user<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
) -> SocialResult<ApiResponse<()>>
where
    A: AuthStore,
    S: SocialStore,
{
    state.profiles().delete(&caller, &user_id).await?;
    Ok(ApiResponse::ok("Account has been deleted successfully.", ()))
}

// ============================================================================
// Follow graph
// ============================================================================

async fn change_follow<A, S>(
    state: SocialAppState<A, S>,
    caller: CurrentUser,
    target_id: String,
    action: FollowAction,
) -> SocialResult<ApiResponse<UserResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let change = FollowUseCase::new(state.store.clone())
        .execute(caller.user(), &target_id, action)
        .await?;

    let message = match change.outcome {
        FollowOutcome::Followed => format!("You started following {}", change.target.user_name),
        FollowOutcome::Unfollowed => format!("You unfollowed {}", change.target.user_name),
    };

    Ok(ApiResponse::ok(message, UserResponse::from(&change.caller)))
}

/// PATCH /api/v1/users/{user_id}/follow (toggle)
pub async fn follow_user<A, S>(
    State(state): State<SocialAppState<A, S>>,
    caller: CurrentUser,
    Path(user_id): Path<String>,
) -> SocialResult<ApiResponse<UserResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    change_follow(state, caller, user_id, FollowAction::Toggle).await
}

/// PATCH /api/v1/users/{user_id}/unfollow
pub async fn unfollow_user<A, S>(
    State(state): State<SocialAppState<A, S>>,
    caller: CurrentUser,
    Path(user_id): Path<String>,
) -> SocialResult<ApiResponse<UserResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    change_follow(state, caller, user_id, FollowAction::Unfollow).await
}

// ============================================================================
// Posts
// ============================================================================

/// POST /api/v1/posts
pub async fn create_post<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> SocialResult<ApiResponse<PostResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let Json(req) = payload?;
    let post = state.posts().create(&caller, req.into()).await?;
    let authors: Authors = [Author::from(&caller)].into_iter().collect();

    Ok(ApiResponse::created(
        "Post created successfully.",
        PostResponse::with_author(post, &authors),
    ))
}

/// GET /api/v1/posts/{post_id}
pub async fn get_post<A, S>(
    State(state): State<SocialAppState<A, S>>,
    Path(post_id): Path<String>,
) -> SocialResult<ApiResponse<PostDetailResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let detail = state.posts().get(&post_id).await?;

    Ok(ApiResponse::ok(
        "Post got successfully.",
        PostDetailResponse {
            post: PostResponse::with_author(detail.post, &detail.authors),
            comments: detail
                .comments
                .into_iter()
                .map(|comment| CommentResponse::with_author(comment, &detail.authors))
                .collect(),
        },
    ))
}

/// PATCH /api/v1/posts/{post_id}
pub async fn update_post<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> SocialResult<ApiResponse<PostResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let Json(req) = payload?;
    let post = state.posts().update(&caller, &post_id, req.into()).await?;

    Ok(ApiResponse::ok("Post updated successfully.", post.into()))
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<String>,
) -> SocialResult<ApiResponse<PostResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let post = state.posts().delete(&caller, &post_id).await?;
    Ok(ApiResponse::ok("Post deleted successfully.", post.into()))
}

/// GET /api/v1/posts/user/{user_id}
pub async fn user_posts<A, S>(
    State(state): State<SocialAppState<A, S>>,
    Path(user_id): Path<String>,
) -> SocialResult<ApiResponse<Vec<PostResponse>>>
where
    A: AuthStore,
    S: SocialStore,
{
    let feed = state.posts().user_posts(&user_id).await?;
    Ok(ApiResponse::ok(
        "User posts got successfully.",
        populated_post_list(feed.posts, &feed.authors),
    ))
}

/// GET /api/v1/posts/timeline/{user_id}
///
/// Always the caller's feed; the path id is not consulted.
pub async fn timeline<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
) -> SocialResult<ApiResponse<Vec<PostResponse>>>
where
    A: AuthStore,
    S: SocialStore,
{
    let feed = state.posts().timeline(&caller).await?;
    Ok(ApiResponse::ok(
        "Timeline got successfully.",
        populated_post_list(feed.posts, &feed.authors),
    ))
}

/// POST /api/v1/posts/{post_id}/like (toggle)
pub async fn like_post<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<String>,
) -> SocialResult<ApiResponse<PostResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let (post, change) = state.posts().like(&caller, &post_id).await?;

    let message = match change {
        LikeChange::Liked => format!("You liked '{}'.", post.desc),
        LikeChange::Unliked => format!("You unliked '{}'.", post.desc),
    };

    Ok(ApiResponse::ok(message, post.into()))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/v1/posts/{post_id}/comment
pub async fn create_comment<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> SocialResult<ApiResponse<CommentResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let Json(req) = payload?;
    let comment = CommentUseCase::new(state.store.clone())
        .create(&caller, &post_id, req.text)
        .await?;
    let authors: Authors = [Author::from(&caller)].into_iter().collect();

    Ok(ApiResponse::created(
        "Comment created successfully.",
        CommentResponse::with_author(comment, &authors),
    ))
}

/// DELETE /api/v1/posts/{post_id}/comment/{comment_id}
pub async fn delete_comment<A, S>(
    State(state): State<SocialAppState<A, S>>,
    CurrentUser(caller): CurrentUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> SocialResult<ApiResponse<CommentResponse>>
where
    A: AuthStore,
    S: SocialStore,
{
    let comment = CommentUseCase::new(state.store.clone())
        .delete(&caller, &post_id, &comment_id)
        .await?;

    Ok(ApiResponse::ok("Comment deleted successfully.", comment.into()))
}
