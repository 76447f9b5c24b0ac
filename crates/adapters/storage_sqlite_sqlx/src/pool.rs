//! `SQLite` connection setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:peryashot.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound on open connections. `1` keeps a single persistent link.
    ///
    /// Must stay `1` for `sqlite::memory:`: each extra connection would open
    /// its own empty in-memory database.
    pub max_connections: u32,
}

impl Config {
    /// Build a [`Database`] from this configuration.
    ///
    /// Opens the connection, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url, self.max_connections).await
    }
}

/// Owns the `SQLite` connection handle shared by every repository.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// Connections are never recycled, so an in-memory database lives as long
    /// as the handle and a dropped link is not re-opened.
    async fn initialize(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Borrow the underlying connection handle.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
pub(crate) async fn memory_database() -> Database {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    }
    .build()
    .await
    .unwrap()
}
