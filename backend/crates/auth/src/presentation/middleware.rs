//! Identity Guard
//!
//! `require_auth` authenticates the bearer token once per request and
//! stores the caller as [`CurrentUser`] in the request extensions. Handlers
//! receive it as an ordinary extractor argument.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::AuthStore;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// The authenticated caller (password hash never loaded)
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Middleware that requires a valid bearer token
///
/// Wire with `axum::middleware::from_fn_with_state(state, require_auth::<R>)`.
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthStore,
{
    let bearer = extract_bearer(req.headers()).map(str::to_owned);

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(bearer.as_deref()).await?;

    tracing::debug!(user_id = %user.user_id, "Authenticated request");

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only reachable without the guard on a misconfigured route
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
