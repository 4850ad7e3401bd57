//! Relational storage plumbing for the catalog services.
//!
//! - [`postgres`]: pool configuration, connection with retry, migrations, health probes
//! - [`transaction`]: the read/write connection pair and the unit-of-work helper
//!   every multi-row write goes through
//! - [`common`]: error type and startup retry policy
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{ReadWriteConfig, connect_read_write, run_migrations};
//!
//! let config = ReadWriteConfig::from_env()?;
//! let db = connect_read_write(config, None).await?;
//! run_migrations::<Migrator>(db.writer(), "catalog_api").await?;
//!
//! let created = db
//!     .with_transaction(|txn| Box::pin(async move { insert_rows(txn).await }))
//!     .await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod transaction;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use transaction::{ReadWriteDb, is_unique_violation};
