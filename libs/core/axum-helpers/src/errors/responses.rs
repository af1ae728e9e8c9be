//! Reusable OpenAPI response types for the shared error envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Messages used by the transport-level errors
pub mod messages {
    pub const VALIDATION_FAILED: &str = "Request validation failed";
    pub const INVALID_UUID: &str = "Invalid UUID format";
    pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
    pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource";
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "type": "Results Product",
        "status": 500,
        "message": "server selection timeout"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "type": "BadRequest",
        "status": 400,
        "message": "Request validation failed",
        "details": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "max": 200, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "type": "BadRequest",
        "status": 400,
        "message": "Invalid UUID format"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "type": "Result Product",
        "status": 404,
        "message": "product is not exist"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - the store refused to create the resource",
    content_type = "application/json",
    example = json!({
        "type": "Add Product",
        "status": 403,
        "message": "add new product failed"
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "type": "Add Product",
        "status": 409,
        "message": "product name already exist"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
