//! Social Router

use std::sync::Arc;

use auth::domain::AuthStore;
use auth::middleware::require_auth;
use auth::presentation::AuthAppState;
use auth::{AuthConfig, PgAuthRepository};
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};

use crate::domain::repository::SocialStore;
use crate::infra::postgres::PgSocialRepository;
use crate::presentation::handlers::{self, SocialAppState};

/// Create the Social router with PostgreSQL repositories
pub fn social_router(
    auth_repo: PgAuthRepository,
    repo: PgSocialRepository,
    config: AuthConfig,
) -> Router {
    social_router_generic(auth_repo, repo, config)
}

/// Create a generic Social router for any repository implementation
///
/// Every route requires a bearer token.
pub fn social_router_generic<A, S>(auth_repo: A, repo: S, config: AuthConfig) -> Router
where
    A: AuthStore,
    S: SocialStore,
{
    let users = Arc::new(auth_repo);
    let config = Arc::new(config);

    let guard_state = AuthAppState::new(users.clone(), config.clone());
    let state = SocialAppState {
        users,
        store: Arc::new(repo),
        config,
    };

    Router::new()
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<A, S>)
                .patch(handlers::update_user::<A, S>)
                .delete(handlers::delete_user::<A, S>),
        )
        .route("/users/{user_id}/follow", patch(handlers::follow_user::<A, S>))
        .route(
            "/users/{user_id}/unfollow",
            patch(handlers::unfollow_user::<A, S>),
        )
        .route("/posts", post(handlers::create_post::<A, S>))
        .route("/posts/timeline/{user_id}", get(handlers::timeline::<A, S>))
        .route("/posts/user/{user_id}", get(handlers::user_posts::<A, S>))
        .route(
            "/posts/{post_id}",
            get(handlers::get_post::<A, S>)
                .patch(handlers::update_post::<A, S>)
                .delete(handlers::delete_post::<A, S>),
        )
        .route("/posts/{post_id}/like", post(handlers::like_post::<A, S>))
        .route(
            "/posts/{post_id}/comment",
            post(handlers::create_comment::<A, S>),
        )
        .route(
            "/posts/{post_id}/comment/{comment_id}",
            delete(handlers::delete_comment::<A, S>),
        )
        .route_layer(from_fn_with_state(guard_state, require_auth::<A>))
        .with_state(state)
}
