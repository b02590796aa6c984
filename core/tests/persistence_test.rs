// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for draft persistence in the SQLite local storage.

mod common;

use std::sync::Arc;
use std::time::Duration;

use baatasari_core::storage::{EVENT_FORM_CURRENT_STEP, EVENT_FORM_DATA};
use baatasari_core::{
    EventDraft, FieldUpdate, LocalStorage, SqliteStorage, Step, TextField, WizardSession,
};
use common::{complete_draft, setup_temp_state};

async fn open(path: &std::path::Path) -> (SqliteStorage, Arc<dyn LocalStorage>) {
    let db = SqliteStorage::open(Some(path)).await.unwrap();
    let shared: Arc<dyn LocalStorage> = Arc::new(db.clone());
    (db, shared)
}

#[tokio::test]
async fn stored_draft_round_trips() {
    let temp = setup_temp_state().unwrap();
    let draft = complete_draft();

    let (db, storage) = open(&temp.database_path()).await;
    let value = serde_json::to_string(&draft).unwrap();
    storage.set(EVENT_FORM_DATA, &value).await.unwrap();
    db.close().await;

    let (db, storage) = open(&temp.database_path()).await;
    let session = WizardSession::restore(storage, Duration::from_millis(10)).await;
    assert_eq!(session.draft(), &draft);
    db.close().await;
}

#[tokio::test]
async fn partial_draft_merges_over_defaults() {
    let temp = setup_temp_state().unwrap();
    let (db, storage) = open(&temp.database_path()).await;
    storage
        .set(
            EVENT_FORM_DATA,
            r#"{"eventName":"X","contactInfo":{"email":"a@b.c"},"ticketQuantity":25}"#,
        )
        .await
        .unwrap();

    let session = WizardSession::restore(storage, Duration::from_millis(10)).await;
    let draft = session.draft();
    assert_eq!(draft.event_name, "X");
    assert_eq!(draft.ticket_quantity, "25");
    // nested objects are replaced as a whole
    assert_eq!(draft.contact_info.email, "a@b.c");
    assert_eq!(draft.contact_info.mobile, "");

    let defaults = EventDraft::default();
    assert_eq!(draft.requirements, defaults.requirements);
    assert_eq!(draft.audience_category, defaults.audience_category);
    db.close().await;
}

#[tokio::test]
async fn session_writes_are_visible_after_reopening() {
    let temp = setup_temp_state().unwrap();
    let (db, storage) = open(&temp.database_path()).await;
    let mut session = WizardSession::restore(storage, Duration::from_secs(60)).await;

    session
        .update(FieldUpdate::Text(TextField::Venue, "Beach Arena".to_string()))
        .unwrap();
    session.next().await.unwrap();
    session.next().await.unwrap();
    session.flush().await.unwrap();
    drop(session);
    db.close().await;

    let (db, storage) = open(&temp.database_path()).await;
    assert_eq!(
        storage.get(EVENT_FORM_CURRENT_STEP).await.unwrap().as_deref(),
        Some("3")
    );
    let session = WizardSession::restore(storage, Duration::from_secs(60)).await;
    assert_eq!(session.step(), Step::Sponsorship);
    assert_eq!(session.draft().venue, "Beach Arena");
    db.close().await;
}

#[tokio::test]
async fn draft_is_saved_once_the_debounce_passes() {
    let temp = setup_temp_state().unwrap();
    let (db, storage) = open(&temp.database_path()).await;
    let mut session = WizardSession::restore(storage.clone(), Duration::from_millis(200)).await;

    session
        .update(FieldUpdate::Text(TextField::EventName, "Art Expo".to_string()))
        .unwrap();
    session
        .update(FieldUpdate::Text(TextField::EventName, "Art Expo 2025".to_string()))
        .unwrap();
    assert_eq!(storage.get(EVENT_FORM_DATA).await.unwrap(), None);

    tokio::time::sleep(Duration::from_millis(800)).await;
    let stored = storage.get(EVENT_FORM_DATA).await.unwrap().unwrap();
    let draft = EventDraft::default().merge_json(&stored).unwrap();
    assert_eq!(draft.event_name, "Art Expo 2025");
    assert!(!session.has_pending_save());
    db.close().await;
}
