use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ErrorResponse;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use uuid::Uuid;

use crate::response::{Operation, messages};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product name already exist")]
    DuplicateName,

    #[error("add new product failed")]
    CreateFailed,

    #[error("products is not exist")]
    Empty,

    /// Lookup by id found nothing
    #[error("product is not exist")]
    NotFound(Uuid),

    /// Delete or update found nothing to act on
    #[error("product is not exist or deleted from owner")]
    Gone(Uuid),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProductError::DuplicateName => StatusCode::CONFLICT,
            ProductError::CreateFailed => StatusCode::FORBIDDEN,
            ProductError::Empty | ProductError::NotFound(_) | ProductError::Gone(_) => {
                StatusCode::NOT_FOUND
            }
            ProductError::Validation(_) => StatusCode::BAD_REQUEST,
            ProductError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Store errors are echoed as-is.
    pub fn message(&self) -> String {
        match self {
            ProductError::Database(msg) if msg.trim().is_empty() => {
                messages::INTERNAL_ERROR.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Attach the operation that failed, for rendering.
    pub fn during(self, operation: Operation) -> OperationError {
        OperationError {
            operation,
            error: self,
        }
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            ProductError::DuplicateName
        } else {
            ProductError::Database(err.to_string())
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// A [`ProductError`] tied to the operation it interrupted.
///
/// Renders as `{"type": <operation>, "status": <code>, "message": <text>}`.
#[derive(Debug)]
pub struct OperationError {
    pub operation: Operation,
    pub error: ProductError,
}

pub type OperationResult<T> = Result<T, OperationError>;

impl IntoResponse for OperationError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        if status.is_server_error() {
            tracing::error!(operation = %self.operation, error = ?self.error, "Product operation failed");
        } else {
            tracing::info!(operation = %self.operation, status = status.as_u16(), "{}", self.error);
        }

        ErrorResponse::new(self.operation.to_string(), status, self.error.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: OperationError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        let id = Uuid::now_v7();
        assert_eq!(ProductError::DuplicateName.status(), StatusCode::CONFLICT);
        assert_eq!(ProductError::CreateFailed.status(), StatusCode::FORBIDDEN);
        assert_eq!(ProductError::Empty.status(), StatusCode::NOT_FOUND);
        assert_eq!(ProductError::NotFound(id).status(), StatusCode::NOT_FOUND);
        assert_eq!(ProductError::Gone(id).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProductError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProductError::Database("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_database_message_falls_back() {
        assert_eq!(
            ProductError::Database(String::new()).message(),
            "internal server error"
        );
        assert_eq!(
            ProductError::Database("socket closed".into()).message(),
            "socket closed"
        );
    }

    #[tokio::test]
    async fn test_operation_error_envelope() {
        let (status, body) = render(ProductError::CreateFailed.during(Operation::Add)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            serde_json::json!({
                "type": "Add Product",
                "status": 403,
                "message": "add new product failed"
            })
        );
    }

    #[tokio::test]
    async fn test_validation_envelope_is_lower_case() {
        let (status, body) = render(
            ProductError::Validation("name: length".into()).during(Operation::Update),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "Update Product");
        assert_eq!(body["message"], "invalid input: name: length");
    }

    #[tokio::test]
    async fn test_gone_envelope() {
        let (status, body) =
            render(ProductError::Gone(Uuid::now_v7()).during(Operation::Delete)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["type"], "Delete Product");
        assert_eq!(body["message"], "product is not exist or deleted from owner");
    }
}
