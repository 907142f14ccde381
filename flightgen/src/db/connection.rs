//! Database connection handling
//!
//! This module provides functionality to establish and manage database connections.

use sqlx::{
    mysql::{MySqlPoolOptions, MySqlRow},
    postgres::{PgPoolOptions, PgRow},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    FromRow, MySql, Pool, Postgres, Sqlite,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// SQL flavor of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

/// Enumeration of supported database types
#[derive(Debug, Clone)]
pub enum DatabaseConnection {
    Postgres(Pool<Postgres>),
    MySql(Pool<MySql>),
    Sqlite(Pool<Sqlite>),
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config.resolve_url()?;
        let pool_size = config.pool_size.unwrap_or(10);
        let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(30));

        let connection = match config.driver.as_str() {
            "postgres" | "postgresql" => {
                let pool = PgPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(timeout)
                    .connect(&url)
                    .await?;

                DatabaseConnection::Postgres(pool)
            }
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(timeout)
                    .connect(&url)
                    .await?;

                DatabaseConnection::MySql(pool)
            }
            "sqlite" => {
                let options = SqliteConnectOptions::from_str(&url)?
                    .create_if_missing(true)
                    .foreign_keys(true);
                let pool = SqlitePoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(timeout)
                    .connect_with(options)
                    .await?;

                DatabaseConnection::Sqlite(pool)
            }
            _ => {
                return Err(Error::DatabaseError(format!(
                    "Unsupported database driver: {}",
                    config.driver
                )))
            }
        };

        tracing::debug!(driver = %config.driver, pool_size, "Connected to database");
        Ok(connection)
    }

    /// SQL dialect spoken by this connection
    pub fn dialect(&self) -> Dialect {
        match self {
            DatabaseConnection::Postgres(_) => Dialect::Postgres,
            DatabaseConnection::MySql(_) => Dialect::MySql,
            DatabaseConnection::Sqlite(_) => Dialect::Sqlite,
        }
    }

    /// Ask the server for its version string, confirming the connection works
    pub async fn server_version(&self) -> Result<String> {
        let version = match self {
            DatabaseConnection::Postgres(pool) => {
                sqlx::query_scalar::<_, String>("SELECT version()")
                    .fetch_one(pool)
                    .await?
            }
            DatabaseConnection::MySql(pool) => {
                sqlx::query_scalar::<_, String>("SELECT VERSION()")
                    .fetch_one(pool)
                    .await?
            }
            DatabaseConnection::Sqlite(pool) => {
                sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(version)
    }

    /// Execute a SQL statement, returning the number of affected rows
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        let affected = match self {
            DatabaseConnection::Postgres(pool) => {
                sqlx::query(sql).execute(pool).await?.rows_affected()
            }
            DatabaseConnection::MySql(pool) => {
                sqlx::query(sql).execute(pool).await?.rows_affected()
            }
            DatabaseConnection::Sqlite(pool) => {
                sqlx::query(sql).execute(pool).await?.rows_affected()
            }
        };

        Ok(affected)
    }

    /// Run a query and map every row onto `T`
    pub async fn fetch_all<T>(&self, sql: &str) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow>
            + for<'r> FromRow<'r, MySqlRow>
            + for<'r> FromRow<'r, SqliteRow>
            + Send
            + Unpin,
    {
        let rows = match self {
            DatabaseConnection::Postgres(pool) => {
                sqlx::query_as::<_, T>(sql).fetch_all(pool).await?
            }
            DatabaseConnection::MySql(pool) => {
                sqlx::query_as::<_, T>(sql).fetch_all(pool).await?
            }
            DatabaseConnection::Sqlite(pool) => {
                sqlx::query_as::<_, T>(sql).fetch_all(pool).await?
            }
        };

        Ok(rows)
    }

    /// Run a query returning a single integer
    pub async fn fetch_i64(&self, sql: &str) -> Result<i64> {
        let value = match self {
            DatabaseConnection::Postgres(pool) => {
                sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
            }
            DatabaseConnection::MySql(pool) => {
                sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
            }
            DatabaseConnection::Sqlite(pool) => {
                sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
            }
        };

        Ok(value)
    }

    /// Next free value of an integer key column
    pub async fn next_id(&self, table: &str, column: &str) -> Result<i64> {
        let sql = format!("SELECT COALESCE(MAX({}), 0) FROM {}", column, table);
        Ok(self.fetch_i64(&sql).await? + 1)
    }
}
