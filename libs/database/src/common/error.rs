/// Errors raised while establishing or probing database connections.
///
/// Query failures inside repositories stay as `sea_orm::DbErr` and are mapped
/// by each domain into its own error type.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] core_config::ConfigError),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
