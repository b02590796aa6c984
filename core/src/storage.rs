// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

use crate::error::Error;

/// Ordered set of approved stall titles.
pub const APPROVED_STALLS: &str = "approvedStalls";
/// Event draft snapshot.
pub const EVENT_FORM_DATA: &str = "eventFormData";
/// Current wizard step, stored as a number.
pub const EVENT_FORM_CURRENT_STEP: &str = "eventFormCurrentStep";
/// Open/closed map of the wizard sections.
pub const EVENT_FORM_OPEN_SECTIONS: &str = "eventFormOpenSections";
/// Event shown on the analytics overview.
pub const ANALYTICS_EVENT_DATA: &str = "analyticsEventData";

/// String key/value store holding JSON values between runs.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    async fn remove(&self, key: &str) -> Result<(), Error>;
}

/// Local storage backed by a SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    #[tracing::instrument]
    pub async fn open(filename: Option<&Path>) -> Result<Self, Error> {
        let options = match filename {
            Some(filename) => {
                tracing::info!(path = %filename.display(), "connecting to SQLite database");
                if let Some(parent) = filename.parent()
                    && !parent.as_os_str().is_empty()
                {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|source| Error::Io {
                            path: parent.to_path_buf(),
                            source,
                        })?;
                }
                SqliteConnectOptions::new()
                    .filename(filename)
                    .create_if_missing(true)
            }
            None => {
                tracing::info!("connecting to in-memory SQLite database");
                SqliteConnectOptions::new().in_memory(true)
            }
        };

        // a single connection keeps an in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        const SQL: &str = "
CREATE TABLE IF NOT EXISTS local_storage (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";
        tracing::debug!("ensuring local storage table");
        sqlx::query(SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}

#[async_trait]
impl LocalStorage for SqliteStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        const SQL: &str = "
INSERT INTO local_storage (key, value) VALUES (?, ?)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
";
        tracing::trace!(key, "writing local storage");
        sqlx::query(SQL)
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Local storage kept in process memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn exercise(storage: &dyn LocalStorage) {
        assert_eq!(storage.get(EVENT_FORM_CURRENT_STEP).await.unwrap(), None);

        storage.set(EVENT_FORM_CURRENT_STEP, "2").await.unwrap();
        storage.set(EVENT_FORM_CURRENT_STEP, "3").await.unwrap();
        assert_eq!(
            storage.get(EVENT_FORM_CURRENT_STEP).await.unwrap().as_deref(),
            Some("3")
        );

        storage.remove(EVENT_FORM_CURRENT_STEP).await.unwrap();
        storage.remove(EVENT_FORM_CURRENT_STEP).await.unwrap();
        assert_eq!(storage.get(EVENT_FORM_CURRENT_STEP).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_storage_overwrites_and_removes() {
        exercise(&MemoryStorage::new()).await;
    }

    #[tokio::test]
    async fn sqlite_storage_overwrites_and_removes() {
        let storage = SqliteStorage::open(None).await.unwrap();
        exercise(&storage).await;
        storage.close().await;
    }

    #[tokio::test]
    async fn sqlite_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("baatasari.db");

        let storage = SqliteStorage::open(Some(&path)).await.unwrap();
        storage.set(APPROVED_STALLS, r#"["Fun Zone"]"#).await.unwrap();
        storage.close().await;

        let storage = SqliteStorage::open(Some(&path)).await.unwrap();
        assert_eq!(
            storage.get(APPROVED_STALLS).await.unwrap().as_deref(),
            Some(r#"["Fun Zone"]"#)
        );
        storage.close().await;
    }
}
