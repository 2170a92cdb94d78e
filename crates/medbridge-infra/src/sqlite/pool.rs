//! Database handle with split read/write connections in WAL mode.
//!
//! SQLite allows only one writer at a time, so `Database` keeps a
//! single-connection write pool for serialized INSERT/DELETE and a small
//! read pool for concurrent SELECTs. Migrations are embedded and applied
//! on the write pool before the read pool opens.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use medbridge_types::error::RepositoryError;

/// Split read/write SQLite handle.
#[derive(Clone)]
pub struct Database {
    /// Multi-connection pool for SELECT queries.
    pub read: SqlitePool,
    /// Single-connection pool serializing writes.
    pub write: SqlitePool,
}

impl Database {
    /// Connect to `database_url`, apply migrations, and open both pools.
    ///
    /// Both pools use WAL journal mode, foreign key enforcement, and a
    /// 5-second busy timeout.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let base_opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let write = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        // Migrations run on the writer before the reader opens.
        sqlx::migrate!("../../migrations")
            .run(&write)
            .await
            .map_err(|e| RepositoryError::Migration(e.to_string()))?;

        let read = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(read_opts)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        Ok(Self { read, write })
    }

    /// Open (or create) the database file inside `data_dir`.
    pub async fn open(data_dir: &Path) -> Result<Self, RepositoryError> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        let db_path = data_dir.join("medbridge.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        Self::connect(&url).await
    }
}
