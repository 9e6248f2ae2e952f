//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Field validation failed; one message per violated rule
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Request body was not valid JSON for the expected payload
    #[error("{}", .0.body_text())]
    Payload(#[from] JsonRejection),

    /// Email already registered (reported as 400 for client compatibility)
    #[error("User already exists!")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authorization header absent or not `Bearer <token>`
    #[error("No token")]
    MissingToken,

    /// Token failed verification, or its user no longer exists
    #[error("Invalid Token")]
    InvalidToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::Payload(_)
            | AuthError::EmailTaken
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::MissingToken | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server errors are replaced by a generic message; the detail only
    /// goes to the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => {
                AppError::new(self.kind(), self.to_string()).with_details(errors.clone())
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_carries_details() {
        let err = AuthError::Validation(vec![
            "Please enter a valid email.".to_string(),
            "Name should be between 3-30 characters.".to_string(),
        ]);
        let app = err.to_app_error();
        assert_eq!(app.details().len(), 2);
        assert!(app.message().contains("valid email"));
    }

    #[test]
    fn test_internal_message_not_leaked() {
        let app = AuthError::Internal("pool exhausted at 10.0.0.5".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }
}
