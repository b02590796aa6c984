// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::draft::EventDraft;
use crate::error::Error;
use crate::photo::EventPhoto;
use crate::storage::{
    EVENT_FORM_CURRENT_STEP, EVENT_FORM_DATA, EVENT_FORM_OPEN_SECTIONS, LocalStorage,
};
use crate::update::FieldUpdate;
use crate::validate::FormErrors;
use crate::wizard::{OpenSections, Step, Transition, Wizard};

/// Default delay before a draft change is written to local storage.
pub const DEFAULT_DRAFT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Delays a storage write until no newer value arrived for the configured delay.
///
/// At most one write is pending. Dropping the debouncer cancels it.
pub struct Debouncer {
    storage: Arc<dyn LocalStorage>,
    delay: Duration,
    pending: Option<PendingWrite>,
}

struct PendingWrite {
    key: &'static str,
    value: String,
    handle: JoinHandle<()>,
}

impl Debouncer {
    pub fn new(storage: Arc<dyn LocalStorage>, delay: Duration) -> Self {
        Self {
            storage,
            delay,
            pending: None,
        }
    }

    /// Schedules a write, replacing the pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, key: &'static str, value: String) {
        self.cancel();

        let storage = self.storage.clone();
        let delay = self.delay;
        let snapshot = value.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match storage.set(key, &snapshot).await {
                Ok(()) => tracing::debug!(key, "debounced write finished"),
                Err(err) => tracing::warn!(key, %err, "debounced write failed"),
            }
        });
        self.pending = Some(PendingWrite { key, value, handle });
    }

    /// Whether a write is still waiting for its delay to pass.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Writes the pending value now instead of waiting.
    pub async fn flush(&mut self) -> Result<(), Error> {
        if let Some(pending) = self.pending.take()
            && !pending.handle.is_finished()
        {
            pending.handle.abort();
            tracing::debug!(key = pending.key, "flushing pending write");
            self.storage.set(pending.key, &pending.value).await?;
        }
        Ok(())
    }

    /// Drops the pending write without running it.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A wizard session: the draft, its navigation state and their persistence.
pub struct WizardSession {
    draft: EventDraft,
    wizard: Wizard,
    storage: Arc<dyn LocalStorage>,
    saver: Debouncer,
}

impl WizardSession {
    /// Opens a session, restoring whatever well-formed state is stored.
    ///
    /// Broken stored values are logged and replaced by defaults.
    #[tracing::instrument(skip(storage))]
    pub async fn restore(storage: Arc<dyn LocalStorage>, debounce: Duration) -> Self {
        let mut draft = EventDraft::default();
        if let Some(raw) = load(storage.as_ref(), EVENT_FORM_DATA).await {
            match draft.merge_json(&raw) {
                Ok(merged) => draft = merged,
                Err(err) => tracing::warn!(%err, "ignoring malformed stored draft"),
            }
        }

        let mut step = Step::default();
        if let Some(raw) = load(storage.as_ref(), EVENT_FORM_CURRENT_STEP).await {
            match Step::parse_stored(&raw) {
                Some(stored) => step = stored,
                None => tracing::warn!(value = %raw, "ignoring invalid stored step"),
            }
        }

        let mut sections = OpenSections::default();
        if let Some(raw) = load(storage.as_ref(), EVENT_FORM_OPEN_SECTIONS).await {
            match serde_json::from_str(&raw) {
                Ok(stored) => sections = stored,
                Err(err) => tracing::warn!(%err, "ignoring malformed stored sections"),
            }
        }

        tracing::debug!(step = step.number(), "wizard session restored");
        Self {
            draft,
            wizard: Wizard::with_state(step, sections),
            saver: Debouncer::new(storage.clone(), debounce),
            storage,
        }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn step(&self) -> Step {
        self.wizard.step()
    }

    pub fn errors(&self) -> &FormErrors {
        self.wizard.errors()
    }

    pub fn sections(&self) -> &OpenSections {
        self.wizard.sections()
    }

    /// Applies a field update and schedules the draft write.
    pub fn update(&mut self, update: FieldUpdate) -> Result<(), Error> {
        self.draft.update(update)?;
        self.schedule_save()
    }

    /// Attaches the photo at `path`. A rejected file clears the current photo.
    pub async fn attach_photo(&mut self, path: &Path) -> Result<(), Error> {
        let photo = EventPhoto::from_path(path).await;
        let result = match photo {
            Ok(photo) => self.draft.update(FieldUpdate::Photo(Some(photo))),
            Err(err) => {
                self.draft.update(FieldUpdate::Photo(None))?;
                Err(err)
            }
        };
        self.schedule_save()?;
        result
    }

    pub async fn next(&mut self) -> Result<Transition, Error> {
        let transition = self.wizard.next(&self.draft);
        self.save_step().await?;
        Ok(transition)
    }

    pub async fn previous(&mut self) -> Result<Transition, Error> {
        let transition = self.wizard.previous();
        self.save_step().await?;
        Ok(transition)
    }

    /// Flips a section and returns whether it is now open.
    pub async fn toggle_section(&mut self, name: &str) -> Result<bool, Error> {
        let open = self.wizard.toggle_section(name);
        let value = serde_json::to_string(self.wizard.sections())?;
        self.storage.set(EVENT_FORM_OPEN_SECTIONS, &value).await?;
        Ok(open)
    }

    pub fn has_pending_save(&self) -> bool {
        self.saver.is_pending()
    }

    /// Writes a pending draft snapshot immediately.
    pub async fn flush(&mut self) -> Result<(), Error> {
        self.saver.flush().await
    }

    fn schedule_save(&mut self) -> Result<(), Error> {
        let value = serde_json::to_string(&self.draft)?;
        self.saver.schedule(EVENT_FORM_DATA, value);
        Ok(())
    }

    async fn save_step(&self) -> Result<(), Error> {
        let value = self.wizard.step().number().to_string();
        self.storage.set(EVENT_FORM_CURRENT_STEP, &value).await
    }
}

async fn load(storage: &dyn LocalStorage, key: &str) -> Option<String> {
    match storage.get(key).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "failed to read local storage");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::update::TextField;

    fn storage() -> (MemoryStorage, Arc<dyn LocalStorage>) {
        let memory = MemoryStorage::new();
        let shared: Arc<dyn LocalStorage> = Arc::new(memory.clone());
        (memory, shared)
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_keeps_only_the_last_write() {
        let (memory, shared) = storage();
        let mut debouncer = Debouncer::new(shared, Duration::from_millis(500));

        debouncer.schedule(EVENT_FORM_DATA, "first".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(EVENT_FORM_DATA, "second".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(memory.get(EVENT_FORM_DATA).await.unwrap(), None);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(
            memory.get(EVENT_FORM_DATA).await.unwrap().as_deref(),
            Some("second")
        );
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_debouncer_cancels_the_write() {
        let (memory, shared) = storage();
        let mut debouncer = Debouncer::new(shared, Duration::from_millis(500));
        debouncer.schedule(EVENT_FORM_DATA, "lost".to_string());
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(memory.get(EVENT_FORM_DATA).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_writes_immediately() {
        let (memory, shared) = storage();
        let mut debouncer = Debouncer::new(shared, Duration::from_secs(60));
        debouncer.schedule(EVENT_FORM_DATA, "now".to_string());
        assert!(debouncer.is_pending());

        debouncer.flush().await.unwrap();
        assert!(!debouncer.is_pending());
        assert_eq!(
            memory.get(EVENT_FORM_DATA).await.unwrap().as_deref(),
            Some("now")
        );
    }

    #[tokio::test]
    async fn navigation_and_sections_are_written_immediately() {
        let (memory, shared) = storage();
        let mut session = WizardSession::restore(shared, DEFAULT_DRAFT_DEBOUNCE).await;

        assert_eq!(session.next().await.unwrap(), Transition::Moved(Step::Ticketing));
        assert_eq!(
            memory.get(EVENT_FORM_CURRENT_STEP).await.unwrap().as_deref(),
            Some("2")
        );

        assert!(!session.toggle_section("discounts").await.unwrap());
        let stored = memory.get(EVENT_FORM_OPEN_SECTIONS).await.unwrap().unwrap();
        let sections: OpenSections = serde_json::from_str(&stored).unwrap();
        assert!(!sections.is_open("discounts"));
        assert!(sections.is_open("ticketing"));
    }

    #[tokio::test]
    async fn broken_stored_state_falls_back_to_defaults() {
        let (memory, shared) = storage();
        memory.set(EVENT_FORM_DATA, "{not json").await.unwrap();
        memory.set(EVENT_FORM_CURRENT_STEP, "9").await.unwrap();
        memory.set(EVENT_FORM_OPEN_SECTIONS, "[1, 2]").await.unwrap();

        let session = WizardSession::restore(shared, DEFAULT_DRAFT_DEBOUNCE).await;
        assert_eq!(session.draft(), &EventDraft::default());
        assert_eq!(session.step(), Step::EventInfo);
        assert_eq!(session.sections(), &OpenSections::default());
    }

    #[tokio::test]
    async fn update_schedules_a_save_and_flush_stores_it() {
        let (memory, shared) = storage();
        let mut session = WizardSession::restore(shared, Duration::from_secs(60)).await;
        session
            .update(FieldUpdate::Text(TextField::EventName, "Art Expo 2025".into()))
            .unwrap();
        assert!(session.has_pending_save());

        session.flush().await.unwrap();
        let stored = memory.get(EVENT_FORM_DATA).await.unwrap().unwrap();
        let draft = EventDraft::default().merge_json(&stored).unwrap();
        assert_eq!(draft.event_name, "Art Expo 2025");
    }

    #[tokio::test]
    async fn rejected_photo_clears_the_previous_one() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("poster.png");
        std::fs::write(&good, b"\x89PNG\r\n\x1a\n0000").unwrap();
        let bad = dir.path().join("poster.txt");
        std::fs::write(&bad, b"plain text").unwrap();

        let (_memory, shared) = storage();
        let mut session = WizardSession::restore(shared, DEFAULT_DRAFT_DEBOUNCE).await;
        session.attach_photo(&good).await.unwrap();
        assert_eq!(session.draft().event_photo.as_ref().unwrap().name, "poster.png");

        assert!(session.attach_photo(&bad).await.is_err());
        assert_eq!(session.draft().event_photo, None);
    }
}
