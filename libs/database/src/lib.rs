//! Database connectors
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client setup, health checks, shutdown
//! - `config` - `core_config::FromEnv` support for the connector configs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "products");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! // ...
//! mongodb::disconnect(client).await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
