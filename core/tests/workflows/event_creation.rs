// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Creating an event through the four wizard steps.

use baatasari_core::{FieldUpdate, Organizer, Step, Transition};

use crate::common::{complete_updates, setup_temp_state, test_config};

async fn fill_complete(organizer: &Organizer) -> baatasari_core::WizardSession {
    let mut session = organizer.open_wizard().await;
    for (path, value) in complete_updates() {
        session.update(FieldUpdate::parse(path, value).unwrap()).unwrap();
    }
    session
}

async fn walk_to_final(session: &mut baatasari_core::WizardSession) {
    for step in [Step::Ticketing, Step::Sponsorship, Step::Final] {
        assert_eq!(session.next().await.unwrap(), Transition::Moved(step));
    }
}

#[tokio::test]
async fn complete_draft_is_submitted_from_the_final_step() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    let mut session = fill_complete(&organizer).await;

    walk_to_final(&mut session).await;
    let Transition::Submitted(draft) = session.next().await.unwrap() else {
        panic!("expected the draft to be submitted");
    };
    assert_eq!(draft.event_name, "Beach Music Night");
    assert_eq!(session.step(), Step::Final);
    assert!(session.errors().is_empty());

    session.flush().await.unwrap();
    drop(session);
    organizer.close().await.unwrap();
}

#[tokio::test]
async fn missing_thank_you_note_keeps_the_wizard_on_the_final_step() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    let mut session = fill_complete(&organizer).await;
    session
        .update(FieldUpdate::parse("postEventFollowUp.thankYouNote", "  ").unwrap())
        .unwrap();

    walk_to_final(&mut session).await;
    let transition = session.next().await.unwrap();
    assert_eq!(transition, Transition::Rejected(Step::Final));
    assert!(transition.scrolls_to_top());
    assert_eq!(
        session.errors().get("postEventFollowUp.thankYouNote"),
        Some("Thank you note is required")
    );
    assert_eq!(session.errors().len(), 1);

    drop(session);
    organizer.close().await.unwrap();
}

#[tokio::test]
async fn rejection_jumps_to_the_earliest_failing_step() {
    let temp = setup_temp_state().unwrap();
    let organizer = Organizer::new(test_config(&temp.state_dir())).await.unwrap();
    let mut session = fill_complete(&organizer).await;
    for (path, value) in [("guidelines", ""), ("eventName", "")] {
        session.update(FieldUpdate::parse(path, value).unwrap()).unwrap();
    }

    walk_to_final(&mut session).await;
    assert_eq!(
        session.next().await.unwrap(),
        Transition::Rejected(Step::EventInfo)
    );
    assert_eq!(session.errors().len(), 2);

    // the rejected step is what a reopened wizard shows
    drop(session);
    let session = organizer.open_wizard().await;
    assert_eq!(session.step(), Step::EventInfo);
    assert!(session.errors().is_empty());

    drop(session);
    organizer.close().await.unwrap();
}
