pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body returned for every error.
///
/// `type` names what failed: an operation for domain errors (e.g.
/// "Add Product") or an error kind for transport-level errors (e.g.
/// "BadRequest"). `status` repeats the HTTP status code.
///
/// ```json
/// {
///   "type": "BadRequest",
///   "status": 400,
///   "message": "Request validation failed",
///   "details": { "name": [{ "code": "length", "message": null, "params": { "min": 1 } }] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            status: status.as_u16(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Transport-level error for requests that never reach a domain handler:
/// malformed bodies, failed validation and malformed path ids.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::ValidationError(_) | AppError::UuidError(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                ErrorResponse::new("BadRequest", status, e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                ErrorResponse::new("BadRequest", status, responses::messages::VALIDATION_FAILED)
                    .with_details(serde_json::to_value(&e).unwrap_or(serde_json::Value::Null))
            }
            AppError::UuidError(e) => {
                tracing::warn!("UUID error: {:?}", e);
                ErrorResponse::new("BadRequest", status, responses::messages::INVALID_UUID)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(status = status.as_u16(), "{}", msg);
                ErrorResponse::new("BadRequest", status, msg)
            }
        };

        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;

    async fn render(err: AppError) -> (StatusCode, String, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_renders_envelope() {
        let (status, content_type, body) =
            render(AppError::BadRequest("id must not be blank".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert_eq!(body["type"], "BadRequest");
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "id must not be blank");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_uuid_error_is_bad_request() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let (status, _, body) = render(AppError::from(err)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "BadRequest");
        assert_eq!(body["message"], responses::messages::INVALID_UUID);
    }

    #[test]
    fn test_error_response_serializes_type_field() {
        let body = ErrorResponse::new("Conflict", StatusCode::CONFLICT, "already there");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "Conflict", "status": 409, "message": "already there" })
        );
    }
}
