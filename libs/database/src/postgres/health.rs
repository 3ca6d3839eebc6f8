use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool. Used by the `/ready` endpoint.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let backend = db.get_database_backend();
    debug!(?backend, "Running database health check");

    let stmt = Statement::from_string(backend, "SELECT 1".to_owned());
    db.query_one_raw(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postgres::{PostgresConfig, connect_from_config};

    #[tokio::test]
    async fn test_check_health_on_sqlite() {
        let db = connect_from_config(PostgresConfig::with_pool_size("sqlite::memory:", 1, 1))
            .await
            .unwrap();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_after_close() {
        let db = connect_from_config(PostgresConfig::with_pool_size("sqlite::memory:", 1, 1))
            .await
            .unwrap();
        let handle = db.clone();
        db.close().await.unwrap();

        let err = check_health(&handle).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().starts_with("Health check failed"));
    }
}
