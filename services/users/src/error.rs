//! Custom error types for the users service

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::{EMAIL_TAKEN, ValidationErrors};

pub const USER_NOT_FOUND: &str = "User not found";

/// Custom error type for the users service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Per-field validation failure
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Body or query string that could not be decoded
    #[error("Bad request: {0}")]
    InvalidBody(String),

    /// The `{id}` path segment did not resolve to a user
    #[error("User not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A concurrent write won the race for this email
            StoreError::DuplicateEmail(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("email", EMAIL_TAKEN);
                ApiError::Validation(errors)
            }
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "is_success": false,
                    "message": errors.summary(),
                    "errors": errors,
                }),
            ),
            ApiError::InvalidBody(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "is_success": false,
                    "message": message,
                    "errors": {},
                }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "is_success": false,
                    "message": USER_NOT_FOUND,
                }),
            ),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Request failed in the store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "is_success": false,
                        "message": "Server Error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = render(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "is_success": false, "message": "User not found" })
        );
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "The email field is required.");

        let (status, body) = render(ApiError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["is_success"], false);
        assert_eq!(body["message"], "The email field is required.");
        assert_eq!(body["errors"]["email"][0], "The email field is required.");
    }

    #[tokio::test]
    async fn test_duplicate_email_becomes_field_error() {
        let err = ApiError::from(StoreError::DuplicateEmail("a@mail.ru".to_string()));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["email"][0], EMAIL_TAKEN);
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error");
        assert!(body.get("errors").is_none());
    }
}
