//! Connection pool setup, migrations and health checks.
//!
//! Named after the production backend, but every helper here takes a plain
//! SeaORM connection URL, so the SQLite pools used by tests go through the
//! same code.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
