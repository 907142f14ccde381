//! Load history tracking
//!
//! Every reference file loaded into the database is recorded together with
//! its md5 checksum, so loading the same file twice can be skipped.

use chrono::Utc;

use crate::db::connection::DatabaseConnection;
use crate::error::Result;
use crate::models::SqlValue;

/// One row of the load history table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LoadEntry {
    pub id: i64,
    pub source: String,
    pub target_table: String,
    pub checksum: String,
    pub row_count: i64,
    pub loaded_at: String,
}

/// Access to the load history table
pub struct LoadHistory<'a> {
    connection: &'a DatabaseConnection,
    table: &'a str,
}

impl<'a> LoadHistory<'a> {
    pub fn new(connection: &'a DatabaseConnection, table: &'a str) -> Self {
        Self { connection, table }
    }

    /// Ensure the load history table exists
    pub async fn ensure_table(&self) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id BIGINT NOT NULL PRIMARY KEY,
                source VARCHAR(255) NOT NULL,
                target_table VARCHAR(64) NOT NULL,
                checksum VARCHAR(32) NOT NULL,
                row_count BIGINT NOT NULL,
                loaded_at VARCHAR(40) NOT NULL
            )",
            self.table
        );

        self.connection.execute(&sql).await?;
        Ok(())
    }

    /// Whether this exact file content was already loaded from `source`
    pub async fn already_loaded(&self, source: &str, checksum: &str) -> Result<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE source = {} AND checksum = {}",
            self.table,
            SqlValue::Text(source.to_string()),
            SqlValue::Text(checksum.to_string())
        );

        Ok(self.connection.fetch_i64(&sql).await? > 0)
    }

    /// Record a completed load
    pub async fn record(
        &self,
        source: &str,
        target_table: &str,
        checksum: &str,
        row_count: usize,
    ) -> Result<()> {
        let id = self.connection.next_id(self.table, "id").await?;
        let sql = format!(
            "INSERT INTO {} (id, source, target_table, checksum, row_count, loaded_at) VALUES ({}, {}, {}, {}, {}, {})",
            self.table,
            id,
            SqlValue::Text(source.to_string()),
            SqlValue::Text(target_table.to_string()),
            SqlValue::Text(checksum.to_string()),
            row_count,
            SqlValue::Text(Utc::now().to_rfc3339())
        );

        self.connection.execute(&sql).await?;

        tracing::info!(source, target_table, checksum, row_count, "Recorded load");
        Ok(())
    }

    /// All recorded loads, oldest first
    pub async fn entries(&self) -> Result<Vec<LoadEntry>> {
        let sql = format!(
            "SELECT id, source, target_table, checksum, row_count, loaded_at FROM {} ORDER BY id",
            self.table
        );

        self.connection.fetch_all(&sql).await
    }
}

/// md5 checksum of file contents, hex encoded
pub fn checksum(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}
