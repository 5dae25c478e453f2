//! PostgreSQL connector and utilities
//!
//! Provides connection settings, single-connection scoped connects, and health checks.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::connect_scoped;
pub use health::{check_health, check_health_scoped};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
