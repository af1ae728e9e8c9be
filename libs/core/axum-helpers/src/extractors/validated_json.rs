//! JSON extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, OptionalFromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed [`Validate::validate`].
///
/// Malformed JSON keeps the status axum picks for it (400, 415 or 422).
/// Validation failures become `400` with the field errors under `details`.
///
/// `Option<ValidatedJson<T>>` is `None` when the request has no
/// `Content-Type`, which is how a body-less request arrives.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1, max = 200))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> String {
///     input.name
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

impl<T, S> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let Some(Json(data)) =
            <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?
        else {
            return Ok(None);
        };
        data.validate()?;
        Ok(Some(ValidatedJson(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Input {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 0))]
        quantity: i64,
    }

    async fn accept(ValidatedJson(input): ValidatedJson<Input>) -> String {
        format!("{}:{}", input.name, input.quantity)
    }

    async fn accept_optional(input: Option<ValidatedJson<Input>>) -> String {
        match input {
            Some(ValidatedJson(input)) => input.name,
            None => "none".to_string(),
        }
    }

    async fn send(body: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/", post(accept))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, body) = send(r#"{"name":"pen","quantity":3}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pen:3");
    }

    #[tokio::test]
    async fn test_invalid_body_reports_fields() {
        let (status, body) = send(r#"{"name":"","quantity":-1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Request validation failed");
        assert!(json["details"].get("name").is_some());
        assert!(json["details"].get("quantity").is_some());
    }

    #[tokio::test]
    async fn test_optional_body_absent() {
        let response = Router::new()
            .route("/", post(accept_optional))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes, "none");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send(r#"{"name":"pen""#).await;
        assert!(status.is_client_error());

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["type"], "BadRequest");
    }
}
