//! Read/write connection pair and the unit-of-work helper.

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, SqlErr, TransactionTrait};
use std::fmt::Display;
use tracing::{debug, error};

/// The two logical connections a repository works with.
///
/// Reads go to `read` (replica), every write and every transaction to `write`
/// (primary). Cloning is cheap: both sides are pool handles.
#[derive(Clone, Debug)]
pub struct ReadWriteDb {
    read: DatabaseConnection,
    write: DatabaseConnection,
}

impl ReadWriteDb {
    pub fn new(read: DatabaseConnection, write: DatabaseConnection) -> Self {
        Self { read, write }
    }

    /// One pool serving both roles (tests, single-node setups)
    pub fn single(conn: DatabaseConnection) -> Self {
        Self {
            read: conn.clone(),
            write: conn,
        }
    }

    pub fn reader(&self) -> &DatabaseConnection {
        &self.read
    }

    pub fn writer(&self) -> &DatabaseConnection {
        &self.write
    }

    /// Runs `block` inside one transaction on the primary.
    ///
    /// Commits when the block returns `Ok`, rolls back when it returns `Err`.
    /// If the rollback itself fails that failure is returned instead of the
    /// block's error, since the connection state is then unknown.
    ///
    /// ```ignore
    /// db.with_transaction(|txn| {
    ///     Box::pin(async move {
    ///         product::Entity::insert(product).exec_without_returning(txn).await?;
    ///         variant::Entity::insert(variant).exec_without_returning(txn).await?;
    ///         Ok::<_, ProductError>(())
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn with_transaction<T, E, F>(&self, block: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<DbErr> + Display + Send,
    {
        let txn = self.write.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            E::from(e)
        })?;

        match block(&txn).await {
            Ok(value) => {
                txn.commit().await.map_err(|e| {
                    error!(error = %e, "Failed to commit transaction");
                    E::from(e)
                })?;
                Ok(value)
            }
            Err(cause) => {
                if let Err(rollback) = txn.rollback().await {
                    error!(error = %rollback, %cause, "Failed to roll back transaction");
                    return Err(E::from(rollback));
                }
                debug!(%cause, "Transaction rolled back");
                Err(cause)
            }
        }
    }

    /// Closes both pools; used on graceful shutdown.
    pub async fn close(self) -> Result<(), DbErr> {
        self.read.close().await?;
        self.write.close().await
    }
}

/// True when the store rejected a write because of a unique or primary key constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, Statement};

    async fn ledger() -> ReadWriteDb {
        // A single pinned connection: every new in-memory SQLite connection is a fresh database.
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let conn = Database::connect(opt).await.unwrap();
        conn.execute_unprepared("CREATE TABLE ledger (id INTEGER PRIMARY KEY, note TEXT NOT NULL)")
            .await
            .unwrap();
        ReadWriteDb::single(conn)
    }

    async fn count(db: &ReadWriteDb) -> i64 {
        let stmt = Statement::from_string(
            db.reader().get_database_backend(),
            "SELECT COUNT(*) AS n FROM ledger",
        );
        let row = db.reader().query_one_raw(stmt).await.unwrap().unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    #[tokio::test]
    async fn test_commit_on_ok() {
        let db = ledger().await;

        let out = db
            .with_transaction(|txn| {
                Box::pin(async move {
                    txn.execute_unprepared("INSERT INTO ledger (id, note) VALUES (1, 'a')")
                        .await?;
                    txn.execute_unprepared("INSERT INTO ledger (id, note) VALUES (2, 'b')")
                        .await?;
                    Ok::<_, DbErr>("done")
                })
            })
            .await;

        assert_eq!(out.unwrap(), "done");
        assert_eq!(count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_rollback_on_err_discards_earlier_writes() {
        let db = ledger().await;

        let out: Result<(), DbErr> = db
            .with_transaction(|txn| {
                Box::pin(async move {
                    txn.execute_unprepared("INSERT INTO ledger (id, note) VALUES (1, 'a')")
                        .await?;
                    Err(DbErr::Custom("second step failed".into()))
                })
            })
            .await;

        assert!(matches!(out, Err(DbErr::Custom(msg)) if msg == "second step failed"));
        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_unique_violation() {
        let db = ledger().await;

        let out: Result<(), DbErr> = db
            .with_transaction(|txn| {
                Box::pin(async move {
                    txn.execute_unprepared("INSERT INTO ledger (id, note) VALUES (1, 'a')")
                        .await?;
                    txn.execute_unprepared("INSERT INTO ledger (id, note) VALUES (1, 'b')")
                        .await?;
                    Ok(())
                })
            })
            .await;

        let err = out.unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(count(&db).await, 0);
    }

    #[test]
    fn test_custom_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Custom("nope".into())));
    }
}
