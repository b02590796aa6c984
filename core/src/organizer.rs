// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use crate::analytics::{AnalyticsProjection, EventOverview};
use crate::approvals::ApprovedStalls;
use crate::config::Config;
use crate::error::Error;
use crate::seed::DraftSeed;
use crate::session::WizardSession;
use crate::storage::{LocalStorage, MemoryStorage, SqliteStorage};

/// Event organizer console core.
///
/// Owns the local storage and hands out the page states built on top of it.
pub struct Organizer {
    config: Config,
    storage: Arc<dyn LocalStorage>,
    sqlite: Option<SqliteStorage>,
}

impl Organizer {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Error> {
        config.normalize()?;

        let (storage, sqlite): (Arc<dyn LocalStorage>, _) = match config.database_path() {
            Some(path) => {
                let db = SqliteStorage::open(Some(&path)).await?;
                (Arc::new(db.clone()), Some(db))
            }
            None => {
                tracing::info!("using in-memory local storage");
                (Arc::new(MemoryStorage::new()), None)
            }
        };

        Ok(Self {
            config,
            storage,
            sqlite,
        })
    }

    /// Creates an instance over an existing store.
    pub fn with_storage(config: Config, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            config,
            storage,
            sqlite: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    pub fn draft_debounce(&self) -> Duration {
        self.config.draft_debounce.get()
    }

    /// Opens the event wizard with whatever draft state is stored.
    pub async fn open_wizard(&self) -> WizardSession {
        WizardSession::restore(self.storage.clone(), self.draft_debounce()).await
    }

    pub async fn approvals(&self) -> Result<ApprovedStalls, Error> {
        ApprovedStalls::load(self.storage.clone()).await
    }

    /// Replaces the stored draft so the next wizard opens prefilled.
    pub async fn seed_draft(&self, seed: &DraftSeed) -> Result<(), Error> {
        seed.store(self.storage.as_ref()).await
    }

    pub async fn record_analytics(&self, projection: &AnalyticsProjection) -> Result<(), Error> {
        projection.record(self.storage.as_ref()).await
    }

    pub async fn overview(&self) -> EventOverview {
        EventOverview::load(self.storage.as_ref()).await
    }

    /// Close the storage connection.
    pub async fn close(self) -> Result<(), Error> {
        if let Some(db) = self.sqlite {
            db.close().await;
        }
        Ok(())
    }
}
