//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, UuidPath, ValidatedJson,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OperationResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::response::{Operation, ProductResponse, messages};
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(add_product, list_products, get_product, delete_product, update_product),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductResponse, Operation, ErrorResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(add_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

/// Add a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product added", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> OperationResult<impl IntoResponse> {
    service
        .add_product(input)
        .await
        .map_err(|e| e.during(Operation::Add))?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::new(Operation::Add, messages::ADD_SUCCESS)),
    ))
}

/// List every product, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> OperationResult<Json<ProductResponse>> {
    let products = service
        .list_products()
        .await
        .map_err(|e| e.during(Operation::List))?;

    Ok(Json(
        ProductResponse::new(Operation::List, messages::LIST_SUCCESS).with_products(products),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> OperationResult<Json<ProductResponse>> {
    let product = service
        .get_product(id)
        .await
        .map_err(|e| e.during(Operation::Get))?;

    Ok(Json(
        ProductResponse::new(Operation::Get, messages::GET_SUCCESS).with_product(product),
    ))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> OperationResult<Json<ProductResponse>> {
    service
        .delete_product(id)
        .await
        .map_err(|e| e.during(Operation::Delete))?;

    Ok(Json(ProductResponse::new(
        Operation::Delete,
        messages::DELETE_SUCCESS,
    )))
}

/// Update a product
///
/// The body is optional. Without one the product is left as is and the
/// call only reports whether it exists.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body(content = UpdateProduct, description = "Fields to change"),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    input: Option<ValidatedJson<UpdateProduct>>,
) -> OperationResult<Json<ProductResponse>> {
    let input = input.map(|ValidatedJson(input)| input).unwrap_or_default();

    service
        .update_product(id, input)
        .await
        .map_err(|e| e.during(Operation::Update))?;

    Ok(Json(ProductResponse::new(
        Operation::Update,
        messages::UPDATE_SUCCESS,
    )))
}
