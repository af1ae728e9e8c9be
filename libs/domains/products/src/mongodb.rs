//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Bson, Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";

/// Stored shape of a [`Product`].
///
/// `_id` is the hyphenated uuid string and `createdAt` a BSON date, so the
/// `createdAt` index orders by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    quantity: i64,
    price: f64,
    category: String,
    created_at: bson::DateTime,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            quantity: product.quantity,
            price: product.price,
            category: product.category.clone(),
            created_at: bson::DateTime::from_millis(product.created_at.timestamp_millis()),
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(doc: ProductDocument) -> ProductResult<Self> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| ProductError::Database(format!("invalid product id {}: {e}", doc.id)))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(doc.created_at.timestamp_millis())
            .ok_or_else(|| ProductError::Database(format!("invalid createdAt on product {id}")))?;

        Ok(Product {
            id,
            name: doc.name,
            quantity: doc.quantity,
            price: doc.price,
            category: doc.category,
            created_at,
        })
    }
}

fn into_product(doc: Option<ProductDocument>) -> ProductResult<Option<Product>> {
    doc.map(Product::try_from).transpose()
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Creates the unique name index and the listing index. Idempotent.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_name_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// `$set` body for the supplied fields only
    fn update_document(input: &UpdateProduct) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(quantity) = input.quantity {
            set.insert("quantity", quantity);
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(ref category) = input.category {
            set.insert("category", category);
        }

        set
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Option<Product>> {
        let product = Product::new(input);

        let result = self
            .collection
            .insert_one(ProductDocument::from(&product))
            .await?;

        if result.inserted_id != Bson::String(product.id.to_string()) {
            tracing::warn!(inserted_id = %result.inserted_id, "Insert acknowledged a different id");
            return Ok(None);
        }

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(Some(product))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "name": name }).await?;
        into_product(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        into_product(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_delete(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        into_product(deleted)
    }

    #[instrument(skip(self, input))]
    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let set = Self::update_document(&input);

        // $set rejects an empty document
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        into_product(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_document_empty() {
        let doc = MongoProductRepository::update_document(&UpdateProduct::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_update_document_only_supplied_fields() {
        let input = UpdateProduct {
            quantity: Some(5),
            price: Some(9.99),
            ..Default::default()
        };
        let doc = MongoProductRepository::update_document(&input);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get_i64("quantity").unwrap(), 5);
        assert_eq!(doc.get_f64("price").unwrap(), 9.99);
        assert!(!doc.contains_key("name"));
    }

    #[test]
    fn test_update_document_with_name() {
        let input = UpdateProduct {
            name: Some("Desk lamp".to_string()),
            category: Some("lighting".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::update_document(&input);

        assert_eq!(doc.get_str("name").unwrap(), "Desk lamp");
        assert_eq!(doc.get_str("category").unwrap(), "lighting");
    }

    fn ruler() -> Product {
        Product::new(CreateProduct {
            name: "Ruler".to_string(),
            quantity: 1,
            price: 0.5,
            category: "office".to_string(),
        })
    }

    fn created_at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_id_filter_matches_stored_id_encoding() {
        let product = ruler();
        let stored = bson::to_document(&ProductDocument::from(&product)).unwrap();
        let filter = MongoProductRepository::id_filter(product.id);

        assert_eq!(filter.get("_id"), stored.get("_id"));
        assert_eq!(stored.get_str("_id").unwrap(), product.id.to_string());
    }

    #[test]
    fn test_created_at_is_stored_as_bson_date() {
        let product = ruler();
        let stored = bson::to_document(&ProductDocument::from(&product)).unwrap();

        let date = stored.get_datetime("createdAt").unwrap();
        assert_eq!(date.timestamp_millis(), product.created_at.timestamp_millis());
    }

    #[test]
    fn test_stored_created_at_orders_by_time() {
        // RFC 3339 renders these with different fraction lengths
        let mut older = ruler();
        older.created_at = created_at("2024-05-01T10:00:00.100Z");
        let mut newer = ruler();
        newer.created_at = created_at("2024-05-01T10:00:00.101Z");
        let mut newest = ruler();
        newest.created_at = created_at("2024-05-01T10:00:01Z");

        let stored = |product: &Product| {
            bson::to_document(&ProductDocument::from(product))
                .unwrap()
                .get("createdAt")
                .cloned()
                .unwrap()
        };

        let (Bson::DateTime(a), Bson::DateTime(b), Bson::DateTime(c)) =
            (stored(&older), stored(&newer), stored(&newest))
        else {
            panic!("createdAt should be stored as a BSON date");
        };
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_document_round_trips_to_product() {
        let product = ruler();
        let stored = bson::to_document(&ProductDocument::from(&product)).unwrap();
        let doc: ProductDocument = bson::from_document(stored).unwrap();

        assert_eq!(Product::try_from(doc).unwrap(), product);
    }

    #[test]
    fn test_document_with_bad_id_is_a_database_error() {
        let mut doc = ProductDocument::from(&ruler());
        doc.id = "not-a-uuid".to_string();

        assert!(matches!(
            Product::try_from(doc),
            Err(ProductError::Database(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGODB_URL"]
    async fn test_create_and_find_against_live_mongodb() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let db = client.database("products_test");
        let repo = MongoProductRepository::with_collection(&db, &format!("products_{}", Uuid::now_v7()));
        repo.init_indexes().await.unwrap();

        let created = repo
            .create(CreateProduct {
                name: "Stapler".to_string(),
                quantity: 4,
                price: 7.25,
                category: "office".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Stapler");

        let duplicate = repo
            .create(CreateProduct {
                name: "Stapler".to_string(),
                quantity: 1,
                price: 1.0,
                category: "office".to_string(),
            })
            .await;
        assert!(matches!(
            duplicate,
            Err(crate::error::ProductError::DuplicateName)
        ));

        assert!(repo.find_by_id_and_delete(created.id).await.unwrap().is_some());
        assert!(repo.find_by_id_and_delete(created.id).await.unwrap().is_none());

        repo.collection.drop().await.unwrap();
    }
}
