//! Catalog API - REST server for products, variants, images and materials

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_read_write, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

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
        environment = ?config.environment,
        "Connecting to database"
    );

    let db = connect_read_write(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(db.writer(), config.app.name).await?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api::routes(&state),
        &state.config.server,
    )?;
    let app = router
        .merge(api::health::router(state.clone()))
        .merge(health_router(state.config.app));

    info!("Starting Catalog API on {}", state.config.server.address());

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database pools");
        if let Err(e) = state.db.close().await {
            warn!(error = %e, "Failed to close database pools");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
