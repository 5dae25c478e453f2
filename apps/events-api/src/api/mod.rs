//! API routes module

pub mod health;

use axum::{Router, routing::get};
use domain_events::{EventService, PgEventRepository};

use crate::state::AppState;

/// Create all API routes
///
/// Each `/fetch` request opens its own connection from the configured
/// settings and closes it before responding.
pub fn routes(state: &AppState) -> Router {
    let repository = PgEventRepository::scoped(state.database().clone());

    Router::new()
        .merge(domain_events::router(EventService::new(repository)))
        .merge(ready_router(state.clone()))
}

/// Router with the /ready endpoint that performs an actual database check.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
