//! SQL executor
//!
//! This module provides SQL execution functionality.

use crate::db::connection::DatabaseConnection;
use crate::error::Result;

/// SQL executor for running statement batches
pub struct SqlExecutor<'a> {
    connection: &'a DatabaseConnection,
}

impl<'a> SqlExecutor<'a> {
    /// Create a new SQL executor
    pub fn new(connection: &'a DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Execute multiple SQL statements in order
    pub async fn execute_batch(&self, statements: &[String]) -> Result<u64> {
        let mut affected = 0;

        for statement in statements {
            affected += self.connection.execute(statement).await?;
        }

        Ok(affected)
    }

    /// Execute multiple SQL statements in a transaction
    ///
    /// The transaction is rolled back when it is dropped without a commit,
    /// so any failing statement leaves the database untouched.
    pub async fn execute_in_transaction(&self, statements: &[String]) -> Result<u64> {
        let mut affected = 0;

        match self.connection {
            DatabaseConnection::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                for statement in statements {
                    affected += sqlx::query(statement).execute(&mut *tx).await?.rows_affected();
                }
                tx.commit().await?;
            }
            DatabaseConnection::MySql(pool) => {
                let mut tx = pool.begin().await?;
                for statement in statements {
                    affected += sqlx::query(statement).execute(&mut *tx).await?.rows_affected();
                }
                tx.commit().await?;
            }
            DatabaseConnection::Sqlite(pool) => {
                let mut tx = pool.begin().await?;
                for statement in statements {
                    affected += sqlx::query(statement).execute(&mut *tx).await?.rows_affected();
                }
                tx.commit().await?;
            }
        }

        Ok(affected)
    }
}
