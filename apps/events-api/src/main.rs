//! Events API - read-only REST access to host events

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
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
        database = %config.database.redacted_url(),
        "Using per-request PostgreSQL connections"
    );

    let state = AppState { config };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} with {:?} graceful shutdown timeout",
        state.config.app.name, state.config.app.version, state.config.shutdown_timeout
    );

    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        async {
            info!("Shutting down: no pooled connections to close");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
