//! Configuration for the WebShop API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations at startup (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
    /// Capacity of the product event channel (`PRODUCT_EVENTS_CAPACITY`, default 256)
    pub events_capacity: usize,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", true)?;
        let events_capacity = env_parse("PRODUCT_EVENTS_CAPACITY", 256usize)?;

        if events_capacity == 0 {
            eyre::bail!("PRODUCT_EVENTS_CAPACITY must be greater than 0");
        }

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            environment,
            run_migrations,
            events_capacity,
        })
    }
}
