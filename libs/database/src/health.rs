use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum HealthCheckError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

/// Check PostgreSQL database health.
///
/// Executes `SELECT 1` to verify the connection pool is usable. Intended
/// for readiness probes.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), HealthCheckError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| HealthCheckError::Failed(format!("PostgreSQL health check failed: {}", e)))?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
