//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// One method per endpoint. Each turns a "nothing there" answer from the
/// repository into the matching [`ProductError`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Add a product whose name is not taken yet
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn add_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self.repository.find_by_name(&input.name).await?.is_some() {
            return Err(ProductError::DuplicateName);
        }

        self.repository
            .create(input)
            .await?
            .ok_or(ProductError::CreateFailed)
    }

    /// All products, newest first. An empty catalog is an error.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        let products = self.repository.find_all().await?;

        if products.is_empty() {
            return Err(ProductError::Empty);
        }
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Returns the removed product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id_and_delete(id)
            .await?
            .ok_or(ProductError::Gone(id))
    }

    /// Apply the supplied fields. A rename onto a taken name fails with
    /// [`ProductError::DuplicateName`] from the unique index.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .find_by_id_and_update(id, input)
            .await?
            .ok_or(ProductError::Gone(id))
    }
}
