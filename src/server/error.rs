// src/server/error.rs
// Rejections from POST /api/analyze before any remote call is made. Remote
// failures are not ApiErrors; they travel as AnalysisResult::Error with a 502.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// `{"error": true, "message", "status", "error_code"}` body for a rejected request
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new unprocessable entity error
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::UNPROCESSABLE_ENTITY,
            error_code: Some("UNPROCESSABLE_ENTITY".to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Turn a missing value into a 422
pub trait IntoApiErrorOption<T> {
    fn ok_or_unprocessable(self, message: &str) -> Result<T, ApiError>;
}

impl<T> IntoApiErrorOption<T> for Option<T> {
    fn ok_or_unprocessable(self, message: &str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::unprocessable_entity(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body() {
        let response = ApiError::unprocessable_entity("person and event are required").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["status"], 422);
        assert_eq!(json["error_code"], "UNPROCESSABLE_ENTITY");
        assert_eq!(json["message"], "person and event are required");
    }

    #[test]
    fn test_option_helper() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_unprocessable("nope").unwrap_err();
        assert_eq!(err.status_code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(Some(3).ok_or_unprocessable("nope").unwrap(), 3);
    }
}
