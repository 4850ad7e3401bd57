//! In-memory SQLite database running the real migrations.

use database::ReadWriteDb;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, ExecResult, Statement,
};

/// Fresh, migrated database per test.
///
/// The pool is pinned to a single connection: every new connection to
/// `sqlite::memory:` would open a separate, empty database.
pub struct TestDatabase {
    connection: DatabaseConnection,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .expect("Failed to open in-memory SQLite database");

        // sqlx enables this by default; cascading deletes depend on it.
        connection
            .execute_unprepared("PRAGMA foreign_keys = ON")
            .await
            .expect("Failed to enable foreign keys");

        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        Self { connection }
    }

    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Read/write pair where both roles share the test connection
    pub fn db(&self) -> ReadWriteDb {
        ReadWriteDb::single(self.connection())
    }

    /// Runs raw SQL, e.g. to install failure-injection triggers.
    pub async fn execute(&self, sql: &str) -> Result<ExecResult, DbErr> {
        self.connection.execute_unprepared(sql).await
    }

    /// Row count of `table`
    pub async fn count(&self, table: &str) -> i64 {
        self.count_where(table, "1 = 1").await
    }

    /// Row count of `table` matching a raw SQL predicate
    pub async fn count_where(&self, table: &str, predicate: &str) -> i64 {
        let stmt = Statement::from_string(
            self.connection.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM {table} WHERE {predicate}"),
        );
        let row = self
            .connection
            .query_one_raw(stmt)
            .await
            .expect("count query failed")
            .expect("count returned no row");
        row.try_get::<i64>("", "n").expect("count column")
    }

    /// Makes every insert into `table` whose `column` equals `value` fail,
    /// aborting the surrounding transaction.
    pub async fn fail_inserts_where(&self, table: &str, column: &str, value: &str) {
        let sql = format!(
            "CREATE TRIGGER fail_{table}_insert BEFORE INSERT ON {table} \
             WHEN NEW.{column} = '{value}' \
             BEGIN SELECT RAISE(ABORT, 'injected failure on {table}'); END;"
        );
        self.execute(&sql)
            .await
            .expect("Failed to install failure trigger");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_create_catalog_tables() {
        let db = TestDatabase::new().await;
        for table in ["products", "variants", "images", "materials"] {
            assert_eq!(db.count(table).await, 0, "{table} should exist and be empty");
        }
    }

    #[tokio::test]
    async fn test_failure_trigger_aborts_matching_insert() {
        let db = TestDatabase::new().await;
        db.fail_inserts_where("materials", "title", "boom").await;

        let err = db
            .execute(
                "INSERT INTO materials (material_id, title, description) \
                 VALUES ('00000000-0000-0000-0000-000000000001', 'boom', '')",
            )
            .await;
        assert!(err.is_err());
        assert_eq!(db.count("materials").await, 0);
    }
}
