//! JSON envelopes returned by the product endpoints.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::models::Product;

/// Operation a response belongs to, sent as the envelope's `type`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Operation {
    #[serde(rename = "Add Product")]
    #[strum(serialize = "Add Product")]
    Add,
    #[serde(rename = "Results Product")]
    #[strum(serialize = "Results Product")]
    List,
    #[serde(rename = "Result Product")]
    #[strum(serialize = "Result Product")]
    Get,
    #[serde(rename = "Delete Product")]
    #[strum(serialize = "Delete Product")]
    Delete,
    #[serde(rename = "Update Product")]
    #[strum(serialize = "Update Product")]
    Update,
}

pub mod messages {
    pub const ADD_SUCCESS: &str = "add new product successfully";
    pub const ADD_FAILED: &str = "add new product failed";
    pub const NAME_TAKEN: &str = "product name already exist";
    pub const LIST_SUCCESS: &str = "products already to use";
    pub const LIST_EMPTY: &str = "products is not exist";
    pub const GET_SUCCESS: &str = "product already to use";
    pub const NOT_FOUND: &str = "product is not exist";
    pub const GONE: &str = "product is not exist or deleted from owner";
    pub const DELETE_SUCCESS: &str = "delete product successfully";
    pub const UPDATE_SUCCESS: &str = "update product successfully";
    pub const INTERNAL_ERROR: &str = "internal server error";
}

/// Success envelope.
///
/// `products` is only present on list, `product` only on get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(rename = "type")]
    pub kind: Operation,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl ProductResponse {
    pub fn new(kind: Operation, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            products: None,
            product: None,
        }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = Some(products);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }
}
