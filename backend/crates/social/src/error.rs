//! Social Error Types
//!
//! Integrates with the unified `kernel::error::AppError` system. Auth
//! failures surfaced by profile operations pass through unchanged.

use auth::AuthError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::follow::FollowError;

pub type SocialResult<T> = Result<T, SocialError>;

#[derive(Debug, Error)]
pub enum SocialError {
    /// Malformed id, missing user, or a user the caller may not modify
    #[error("User not found.")]
    UserNotFound,

    /// Malformed id, missing post, or a post the caller may not modify
    #[error("Post not found.")]
    PostNotFound,

    /// Malformed id, missing comment, or a comment the caller did not write
    #[error("Comment not found.")]
    CommentNotFound,

    #[error(transparent)]
    Follow(#[from] FollowError),

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{}", .0.body_text())]
    Payload(#[from] JsonRejection),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SocialError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SocialError::UserNotFound
            | SocialError::PostNotFound
            | SocialError::CommentNotFound => ErrorKind::NotFound,
            SocialError::Follow(_) | SocialError::Validation(_) | SocialError::Payload(_) => {
                ErrorKind::BadRequest
            }
            SocialError::Auth(e) => e.kind(),
            SocialError::Database(_) | SocialError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            SocialError::Validation(errors) => {
                AppError::new(self.kind(), self.to_string()).with_details(errors.clone())
            }
            SocialError::Auth(e) => e.to_app_error(),
            SocialError::Database(_) | SocialError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            SocialError::Database(e) => {
                tracing::error!(error = %e, "Social database error");
            }
            SocialError::Internal(msg) => {
                tracing::error!(message = %msg, "Social internal error");
            }
            SocialError::Auth(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Auth error during social operation");
            }
            _ => {
                tracing::debug!(error = %self, "Social error");
            }
        }
    }
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
