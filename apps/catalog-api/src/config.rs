//! Configuration for Catalog API

use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::ReadWriteConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: ReadWriteConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `RUN_MIGRATIONS`, on unless set to `false`
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = ReadWriteConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse_or("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
        })
    }
}
