// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread; the [`Database`] struct is the single writer. Query modules
//! accept `&Database` and go through `connection().call()`.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::debug;

use offercast_core::OffercastError;

/// Convert tokio-rusqlite errors into `OffercastError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> OffercastError {
    OffercastError::Storage {
        source: Box::new(e),
    }
}

/// Convert direct rusqlite errors (connection open) into `OffercastError::Storage`.
fn map_sql_err(e: rusqlite::Error) -> OffercastError {
    OffercastError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the single SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply pragmas, and run all
    /// pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, OffercastError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| OffercastError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(map_sql_err)?;
        Self::setup(&conn, wal_mode).await?;
        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database with migrations applied. Test helper.
    pub async fn open_in_memory() -> Result<Self, OffercastError> {
        let conn = Connection::open_in_memory().await.map_err(map_sql_err)?;
        Self::setup(&conn, false).await?;
        Ok(Self { conn })
    }

    async fn setup(conn: &Connection, wal_mode: bool) -> Result<(), OffercastError> {
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        // Migrations carry their own error type through the call closure.
        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| OffercastError::Storage {
                source: Box::new(e),
            })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL, flushing pending pages into the main database
    /// file. Safe to call in rollback-journal mode (no-op).
    pub async fn checkpoint(&self) -> Result<(), OffercastError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        assert!(path.exists());

        // The migration must have created both record tables.
        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(names)
            })
            .await
            .unwrap();
        assert!(tables.iter().any(|t| t == "offer_requests"));
        assert!(tables.iter().any(|t| t == "offer_responses"));
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/records.db");
        Database::open(path.to_str().unwrap(), false).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn checkpoint_succeeds_in_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        db.checkpoint().await.unwrap();
    }
}
