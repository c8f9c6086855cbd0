//! SQLite connection pool for the content store.
//!
//! A server may start with no database URL at all; `connect_optional` then
//! yields no pool and the content repository answers every call with
//! `RepositoryError::NotInitialized`. When a URL is given, reads go through a
//! multi-connection pool and writes through a single connection, both in WAL
//! mode, with the `contents` migrations applied before the reader opens.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Reader (up to 8 connections) and writer (1 connection) pools over one database file.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the pools for `database_url` and apply pending migrations.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(read_opts)
            .await?;

        tracing::debug!(url = %database_url, "database pool ready");

        Ok(Self { reader, writer })
    }

    /// Connect when a URL is configured; `None` leaves storage uninitialized.
    pub async fn connect_optional(database_url: Option<&str>) -> Result<Option<Self>, sqlx::Error> {
        match database_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Ok(Some(Self::new(url).await?)),
            None => {
                tracing::warn!("no database URL configured, storage is not initialized");
                Ok(None)
            }
        }
    }
}
