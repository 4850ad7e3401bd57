use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Pool settings for one PostgreSQL endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Log every statement through sqlx (noisy, dev only)
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reads the pool settings of one role (`WRITE` or `READ`) on top of `url`.
    ///
    /// - `DB_{ROLE}_MAX_CONNECTIONS` (default 10)
    /// - `DB_{ROLE}_MIN_CONNECTIONS` (default 1)
    /// - `DB_CONNECT_TIMEOUT_SECS` (default 30), shared by both roles
    /// - `DB_IDLE_TIMEOUT_SECS` (default 600), shared by both roles
    /// - `DB_SQLX_LOGGING` (default false)
    #[cfg(feature = "config")]
    pub fn from_env_for_role(url: String, role: &str) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url,
            max_connections: env_parse_or(
                &format!("DB_{role}_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            min_connections: env_parse_or(
                &format!("DB_{role}_MIN_CONNECTIONS"),
                defaults.min_connections,
            )?,
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs)?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
        })
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            sqlx_logging: false,
        }
    }
}

/// Primary (write) and replica (read) pool settings.
///
/// Without a replica both pools point at the primary but keep their own limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadWriteConfig {
    pub write: PostgresConfig,
    pub read: PostgresConfig,
}

impl ReadWriteConfig {
    /// Both roles on the same endpoint with default pool sizes
    pub fn single(url: impl Into<String>) -> Self {
        let write = PostgresConfig::new(url);
        Self {
            read: write.clone(),
            write,
        }
    }
}

/// - `DATABASE_URL` (required): primary
/// - `DATABASE_READ_URL` (optional): replica, defaults to `DATABASE_URL`
#[cfg(feature = "config")]
impl FromEnv for ReadWriteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let write_url = env_required("DATABASE_URL")?;
        let read_url = std::env::var("DATABASE_READ_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| write_url.clone());

        Ok(Self {
            write: PostgresConfig::from_env_for_role(write_url, "WRITE")?,
            read: PostgresConfig::from_env_for_role(read_url, "READ")?,
        })
    }
}
