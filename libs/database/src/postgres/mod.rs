//! PostgreSQL connection management
//!
//! Pool settings, the read/write connection pair, migrations and health probes.

mod config;
mod connector;
mod health;

pub use config::{PostgresConfig, ReadWriteConfig};
pub use connector::{
    connect_from_config, connect_from_config_with_retry, connect_read_write, run_migrations,
};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
