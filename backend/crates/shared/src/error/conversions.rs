//! Error conversions
//!
//! Database error classification and the HTTP failure envelope for
//! [`AppError`].

use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// PostgreSQL `unique_violation`
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
const UNIQUE_VIOLATION: &str = "23505";

/// Whether the error is a unique constraint violation
///
/// Repositories use this to turn a racing duplicate insert into the same
/// domain error an up-front existence check would have produced.
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}

// ============================================================================
// Failure envelope
// ============================================================================

/// JSON body for a failed request: `{ "message": ..., "errors": [...] }`
///
/// `errors` is omitted when there are no detail messages. Server errors
/// never expose their source chain.
pub fn error_body(err: &AppError) -> serde_json::Value {
    let mut body = serde_json::json!({ "message": err.message() });
    if !err.details().is_empty() {
        body["errors"] = serde_json::json!(err.details());
    }
    body
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(error_body(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_without_details() {
        let err = AppError::not_found("Post not found.");
        let body = error_body(&err);
        assert_eq!(body["message"], "Post not found.");
        assert!(body.get("errors").is_none());
        assert!(body.get("stack").is_none());
    }

    #[test]
    fn test_error_body_with_details() {
        let err = AppError::bad_request("Validation failed")
            .with_details(vec!["Please enter a valid email.".to_string()]);
        let body = error_body(&err);
        assert_eq!(body["errors"][0], "Please enter a valid email.");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::unauthorized("Not authorized, no token").into_response();
        assert_eq!(response.status().as_u16(), 401);
    }
}
