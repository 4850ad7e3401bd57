use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};

use super::{PostgresConfig, ReadWriteConfig};
use crate::common::{RetryConfig, retry_with_backoff};
use crate::transaction::ReadWriteDb;

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    db.ping().await?;
    Ok(db)
}

/// Opens a pool without retrying
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Opens a pool, retrying with backoff while the server is unreachable.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    retry_with_backoff(
        || connect_with_options(options.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}

/// Connects the primary and the replica pools.
///
/// When both roles share a URL they still get separate pools so read traffic
/// cannot starve writers of connections.
#[instrument(skip_all)]
pub async fn connect_read_write(
    config: ReadWriteConfig,
    retry_config: Option<RetryConfig>,
) -> Result<ReadWriteDb, DbErr> {
    let shared = config.read.url == config.write.url;

    let write = connect_from_config_with_retry(config.write, retry_config.clone()).await?;
    info!("Connected to primary database");

    let read = connect_from_config_with_retry(config.read, retry_config).await?;
    info!(shared_endpoint = shared, "Connected to read database");

    Ok(ReadWriteDb::new(read, write))
}

/// Applies every pending migration of `M` on `db`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
