//! Success envelope
//!
//! Every successful endpoint answers with `{ "message": ..., "payload": ... }`.

use std::borrow::Cow;

use serde::Serialize;

/// Success response body with its HTTP status
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: u16,
    message: Cow<'static, str>,
    payload: T,
}

impl<T> ApiResponse<T> {
    /// 200 OK
    pub fn ok(message: impl Into<Cow<'static, str>>, payload: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            payload,
        }
    }

    /// 201 Created
    pub fn created(message: impl Into<Cow<'static, str>>, payload: T) -> Self {
        Self {
            status: 201,
            message: message.into(),
            payload,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let res = ApiResponse::ok("Post got successfully.", vec![1, 2, 3]);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["message"], "Post got successfully.");
        assert_eq!(json["payload"], serde_json::json!([1, 2, 3]));
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_created_status() {
        let res = ApiResponse::created("Post created successfully.", ());
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.message(), "Post created successfully.");
        assert_eq!(ApiResponse::ok("ok", ()).status_code(), 200);
    }
}
