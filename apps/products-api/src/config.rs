//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb: with_default_app_name(mongodb),
            server,
            environment,
        })
    }
}

/// The service name shows up in MongoDB server logs unless overridden.
fn with_default_app_name(config: MongoConfig) -> MongoConfig {
    match config.app_name {
        Some(_) => config,
        None => config.with_app_name(env!("CARGO_PKG_NAME")),
    }
}
