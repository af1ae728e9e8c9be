use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity as served over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, sent as `_id` like the stored document
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name, unique across the catalog
    pub name: String,
    /// Units in stock
    pub quantity: i64,
    pub price: f64,
    pub category: String,
    /// Set once, when the product is added. Millisecond precision, as stored.
    pub created_at: DateTime<Utc>,
}

/// DTO for adding a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

/// DTO for updating a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
}

impl Product {
    /// Builds a new product with a fresh v7 id and the current time,
    /// truncated to the millisecond a BSON date can hold.
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            category: input.category,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }
}

impl UpdateProduct {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}
