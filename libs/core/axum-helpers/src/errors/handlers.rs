use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorResponse, responses::messages};

/// Fallback handler for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    ErrorResponse::new("NotFound", StatusCode::NOT_FOUND, messages::ROUTE_NOT_FOUND)
        .into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new(
        "MethodNotAllowed",
        StatusCode::METHOD_NOT_ALLOWED,
        messages::METHOD_NOT_ALLOWED,
    )
    .into_response()
}
