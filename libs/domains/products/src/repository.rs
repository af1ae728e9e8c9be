use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// `None` from a lookup means nothing matched; errors are reserved for the
/// store itself failing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product. `None` if the store did not keep it.
    async fn create(&self, input: CreateProduct) -> ProductResult<Option<Product>>;

    /// Every product, newest first
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Remove a product, returning what was removed
    async fn find_by_id_and_delete(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply the supplied fields, returning the product after the update
    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>>;
}
