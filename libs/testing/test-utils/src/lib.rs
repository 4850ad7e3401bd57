//! Shared test utilities for the catalog domains
//!
//! - [`TestDatabase`]: migrated in-memory SQLite, one per test
//! - [`TestPostgres`]: migrated PostgreSQL container for `#[ignore]`d tests that
//!   need the real server
//! - [`TestDataBuilder`]: deterministic ids and names derived from the test name
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("create_with_variant");
//!
//! let user_id = builder.user_id();
//! let name = builder.name("product", "main");
//! assert_eq!(db.count("products").await, 0);
//! # }
//! ```

use uuid::Uuid;

mod postgres;
mod sqlite;

pub use postgres::TestPostgres;
pub use sqlite::TestDatabase;

/// Deterministic test data keyed by a seed
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test name, so every test gets stable but distinct data
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn user_id(&self) -> Uuid {
        self.uuid_with_tag(0x55)
    }

    pub fn brand_id(&self) -> Uuid {
        self.uuid_with_tag(0xB0)
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    fn uuid_with_tag(&self, tag: u8) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [tag; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }
}
