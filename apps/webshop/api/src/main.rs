//! WebShop API - product catalog REST server

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        "Connecting to the database"
    );
    let db = connect_from_config_with_retry(config.database.clone(), config.retry.clone()).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState {
        products_subject: api::products::subject(config.events_capacity),
        config,
        db,
    };

    let app = api::app(&state)?;

    info!("Starting WebShop API on port {}", state.config.server.port);

    let db = state.db.clone();
    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing database pool");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close database pool");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("WebShop API shutdown complete");
    Ok(())
}
