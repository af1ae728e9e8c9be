//! MongoDB connection management
//!
//! Config, connect (optionally retried), health probes and shutdown.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    MongoError, client_options, connect_from_config, connect_from_config_with_retry, disconnect,
};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
