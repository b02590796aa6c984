// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use crate::error::Error;
use crate::fixtures::Stall;
use crate::storage::{APPROVED_STALLS, LocalStorage};

/// A short-lived message shown after an approval change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Titles of the approved stalls, in approval order.
///
/// Only obtainable through [`ApprovedStalls::load`], so the stored set is always
/// read before anything is written back.
pub struct ApprovedStalls {
    titles: Vec<String>,
    storage: Arc<dyn LocalStorage>,
}

impl ApprovedStalls {
    pub async fn load(storage: Arc<dyn LocalStorage>) -> Result<Self, Error> {
        let titles = match storage.get(APPROVED_STALLS).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to parse approved stalls");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Self { titles, storage })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn is_approved(&self, title: &str) -> bool {
        self.titles.iter().any(|a| a == title)
    }

    /// Approves a stall. Returns `None` when it already was approved.
    #[tracing::instrument(skip(self))]
    pub async fn approve(&mut self, title: &str) -> Result<Option<Notification>, Error> {
        if self.is_approved(title) {
            return Ok(None);
        }

        let mut titles = self.titles.clone();
        titles.push(title.to_string());
        self.save(titles).await?;
        Ok(Some(Notification {
            title: "✓ Stall Approved".to_string(),
            description: format!("{title} has been approved successfully."),
        }))
    }

    /// Revokes an approval. Revoking an unknown title changes nothing but still
    /// reports the denial.
    #[tracing::instrument(skip(self))]
    pub async fn revoke(&mut self, title: &str) -> Result<Notification, Error> {
        let titles = self.titles.iter().filter(|a| *a != title).cloned().collect();
        self.save(titles).await?;
        Ok(Notification {
            title: "✓ Stall Denied".to_string(),
            description: format!("{title} has been denied."),
        })
    }

    /// Stalls still waiting for approval, in listing order.
    pub fn pending<'a>(&self, stalls: &'a [Stall]) -> Vec<&'a Stall> {
        stalls.iter().filter(|a| !self.is_approved(a.title)).collect()
    }

    /// Approved stalls, in listing order.
    pub fn approved<'a>(&self, stalls: &'a [Stall]) -> Vec<&'a Stall> {
        stalls.iter().filter(|a| self.is_approved(a.title)).collect()
    }

    /// Writes `titles` and adopts them only once the write succeeded.
    async fn save(&mut self, titles: Vec<String>) -> Result<(), Error> {
        let value = serde_json::to_string(&titles)?;
        self.storage.set(APPROVED_STALLS, &value).await?;
        self.titles = titles;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::STALLS;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Reads from memory, refuses writes while `broken` is set.
    struct FlakyStorage {
        memory: MemoryStorage,
        broken: AtomicBool,
    }

    #[async_trait]
    impl LocalStorage for FlakyStorage {
        async fn get(&self, key: &str) -> Result<Option<String>, Error> {
            self.memory.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(Error::Config("disk is full".to_string()));
            }
            self.memory.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), Error> {
            self.memory.remove(key).await
        }
    }

    #[tokio::test]
    async fn approve_twice_keeps_one_entry() {
        let memory = MemoryStorage::new();
        let mut approvals = ApprovedStalls::load(Arc::new(memory.clone())).await.unwrap();

        let first = approvals.approve("Fun Zone").await.unwrap().unwrap();
        assert_eq!(first.title, "✓ Stall Approved");
        assert_eq!(first.description, "Fun Zone has been approved successfully.");
        assert_eq!(approvals.approve("Fun Zone").await.unwrap(), None);

        assert_eq!(approvals.titles(), ["Fun Zone"]);
        assert_eq!(
            memory.get(APPROVED_STALLS).await.unwrap().as_deref(),
            Some(r#"["Fun Zone"]"#)
        );
    }

    #[tokio::test]
    async fn revoking_a_non_member_is_a_no_op() {
        let memory = MemoryStorage::new();
        memory.set(APPROVED_STALLS, r#"["Taste Town"]"#).await.unwrap();
        let mut approvals = ApprovedStalls::load(Arc::new(memory.clone())).await.unwrap();

        let note = approvals.revoke("Fun Zone").await.unwrap();
        assert_eq!(note.description, "Fun Zone has been denied.");
        assert_eq!(approvals.titles(), ["Taste Town"]);

        approvals.revoke("Taste Town").await.unwrap();
        assert!(approvals.titles().is_empty());
        assert_eq!(memory.get(APPROVED_STALLS).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn loading_keeps_the_stored_set() {
        let memory = MemoryStorage::new();
        memory
            .set(APPROVED_STALLS, r#"["Melody Makers","Taste Town"]"#)
            .await
            .unwrap();

        let approvals = ApprovedStalls::load(Arc::new(memory.clone())).await.unwrap();
        let pending: Vec<_> = approvals.pending(&STALLS).iter().map(|a| a.title).collect();
        assert_eq!(
            pending,
            ["Twinkle Tales", "Handmade Haven", "Fun Zone", "LEGENDS of hip-Hop"]
        );
        let approved: Vec<_> = approvals.approved(&STALLS).iter().map(|a| a.title).collect();
        assert_eq!(approved, ["Taste Town", "Melody Makers"]);

        // nothing is written back just by loading
        assert_eq!(
            memory.get(APPROVED_STALLS).await.unwrap().as_deref(),
            Some(r#"["Melody Makers","Taste Town"]"#)
        );
    }

    #[tokio::test]
    async fn malformed_stored_set_starts_empty() {
        let memory = MemoryStorage::new();
        memory.set(APPROVED_STALLS, "oops").await.unwrap();
        let approvals = ApprovedStalls::load(Arc::new(memory)).await.unwrap();
        assert!(approvals.titles().is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_the_set_unchanged() {
        let storage = Arc::new(FlakyStorage {
            memory: MemoryStorage::new(),
            broken: AtomicBool::new(true),
        });
        storage.memory.set(APPROVED_STALLS, r#"["Taste Town"]"#).await.unwrap();
        let mut approvals = ApprovedStalls::load(storage.clone()).await.unwrap();

        assert!(approvals.approve("Fun Zone").await.is_err());
        assert_eq!(approvals.titles(), ["Taste Town"]);
        assert!(approvals.revoke("Taste Town").await.is_err());
        assert_eq!(approvals.titles(), ["Taste Town"]);

        // a retry once storage recovers really writes
        storage.broken.store(false, Ordering::SeqCst);
        assert!(approvals.approve("Fun Zone").await.unwrap().is_some());
        assert_eq!(
            storage.memory.get(APPROVED_STALLS).await.unwrap().as_deref(),
            Some(r#"["Taste Town","Fun Zone"]"#)
        );
    }
}
