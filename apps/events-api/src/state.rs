//! Application state management

use database::postgres::PostgresConfig;

/// Shared application state
///
/// Holds connection settings only: every request opens and closes its own
/// connection, so nothing pooled lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
}

impl AppState {
    pub fn database(&self) -> &PostgresConfig {
        &self.config.database
    }
}
