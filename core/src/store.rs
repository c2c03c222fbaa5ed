// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <shutter@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Durable record of which items have been uploaded.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// A row in the sync state table.
///
/// Presence of a row means the item was uploaded, or verified present, at
/// `synced_at_ms`; absence means the item is pending.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SyncRecord {
    /// Item identifier, shared with [`MediaItem::id`](crate::MediaItem).
    pub id: i64,
    /// File name at the time of sync.
    pub file_name: String,
    /// When the upload or verification completed, in ms since the epoch.
    pub synced_at_ms: i64,
}

/// SQLite-backed store of [`SyncRecord`]s.
#[derive(Debug, Clone)]
pub struct SyncStore {
    pool: SqlitePool,
}

impl SyncStore {
    /// Opens the store under `state_dir`, or in memory when `None`.
    ///
    /// The backing table is created on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn open(state_dir: Option<&Path>) -> Result<Self, sqlx::Error> {
        const FILE_NAME: &str = "sync.db";

        let options = match state_dir {
            Some(dir) => {
                let path = dir.join(FILE_NAME);
                tracing::debug!(path = %path.display(), "connecting to SQLite database");
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
            }
            None => {
                tracing::debug!("connecting to in-memory SQLite database");
                SqliteConnectOptions::new().in_memory(true)
            }
        };

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS synced_media (
    id           INTEGER PRIMARY KEY,
    file_name    TEXT    NOT NULL,
    synced_at_ms INTEGER NOT NULL
);";
        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Whether `id` has a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn is_synced(&self, id: i64) -> Result<bool, sqlx::Error> {
        const SQL: &str = "SELECT EXISTS(SELECT 1 FROM synced_media WHERE id = ?);";

        let row: (i64,) = sqlx::query_as(SQL).bind(id).fetch_one(&self.pool).await?;
        Ok(row.0 != 0)
    }

    /// Inserts a record, replacing any previous one with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn insert(&self, record: &SyncRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO synced_media (id, file_name, synced_at_ms)
VALUES (?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    file_name    = excluded.file_name,
    synced_at_ms = excluded.synced_at_ms;";

        sqlx::query(SQL)
            .bind(record.id)
            .bind(&record.file_name)
            .bind(record.synced_at_ms)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Removes the record with `record.id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn delete(&self, record: &SyncRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM synced_media WHERE id = ?;";

        sqlx::query(SQL).bind(record.id).execute(&self.pool).await?;
        Ok(())
    }

    /// Removes every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn delete_all(&self) -> Result<(), sqlx::Error> {
        const SQL: &str = "DELETE FROM synced_media;";

        sqlx::query(SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns all records, oldest sync first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn all(&self) -> Result<Vec<SyncRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, file_name, synced_at_ms
FROM synced_media
ORDER BY synced_at_ms, id;";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Number of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        const SQL: &str = "SELECT COUNT(*) FROM synced_media;";

        let row: (i64,) = sqlx::query_as(SQL).fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    /// Closes the connection pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
