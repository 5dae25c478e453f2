use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use super::{PostgresConfig, connect_scoped};
use crate::common::{DatabaseError, DatabaseResult};

/// Check PostgreSQL database health
///
/// Executes `SELECT 1` to verify the connection is working.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

/// Open a scoped connection, run [`check_health`], and close it again.
pub async fn check_health_scoped(config: &PostgresConfig) -> DatabaseResult<()> {
    let db = connect_scoped(config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    let result = check_health(&db).await;

    if let Err(e) = db.close().await {
        debug!(error = %e, "Error closing health check connection");
    }

    result
}
