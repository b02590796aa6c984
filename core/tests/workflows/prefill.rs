// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Opening the wizard and the analytics page from other pages.

use baatasari_core::fixtures::{ARTIST_REQUESTS, MANAGED_EVENT_PAGES, RowAction};
use baatasari_core::{AnalyticsProjection, DraftSeed, Organizer, validate};

use crate::common::{setup_temp_state, test_config};

#[tokio::test]
async fn repeating_a_past_event_opens_a_draft_without_schedule() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    let event = &MANAGED_EVENT_PAGES[1][0];
    assert_eq!(event.action(), RowAction::Repeat);

    organizer
        .seed_draft(&DraftSeed::for_managed_event(event))
        .await
        .unwrap();
    let session = organizer.open_wizard().await;
    let draft = session.draft();
    assert_eq!(draft.event_name, "MARITZA CORREA Vizag");
    assert!(draft.date.is_empty());

    let errors = validate(draft);
    assert!(errors.get("eventName").is_none());
    assert!(errors.get("date").is_some());

    drop(session);
    organizer.close().await.unwrap();
}

#[tokio::test]
async fn hosting_an_artist_request_replaces_the_previous_draft() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    organizer
        .seed_draft(&DraftSeed::for_reschedule())
        .await
        .unwrap();

    let request = &ARTIST_REQUESTS[0];
    organizer
        .seed_draft(&DraftSeed::for_artist_request(request))
        .await
        .unwrap();
    let session = organizer.open_wizard().await;
    assert_eq!(session.draft().event_name, request.title);
    assert_eq!(session.draft().category, "Entertainment");
    assert!(session.draft().time.is_empty());

    drop(session);
    organizer.close().await.unwrap();
}

#[tokio::test]
async fn analytics_overview_follows_the_last_viewed_event() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    assert_eq!(organizer.overview().await.event_name, "Martiza Concert Vizag");

    let event = &MANAGED_EVENT_PAGES[0][1];
    organizer
        .record_analytics(&AnalyticsProjection::from(event))
        .await
        .unwrap();
    let overview = organizer.overview().await;
    assert_eq!(overview.event_name, "Bharat Marine Systems 2025");
    assert_eq!(overview.status, "Upcoming");
    // location and time are not part of the projection
    assert_eq!(overview.location, "Visakhapatnam");
    assert_eq!(overview.time, "12:00 PM");

    organizer.close().await.unwrap();
}
