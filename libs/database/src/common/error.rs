/// Error type for connection health checks.
///
/// Query-level failures stay as [`sea_orm::DbErr`] so callers can inspect
/// them with `DbErr::sql_err()`.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
