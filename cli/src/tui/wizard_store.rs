// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, path::Path, rc::Rc};

use baatasari_core::{
    AudienceRange, Error, EventDraft, FieldUpdate, FormErrors, ListField, OpenSections, Step,
    Transition, WizardSession,
};

use crate::tui::dispatcher::{Action, Dispatcher};

/// What the wizard pages render: a snapshot of the session plus view-only state.
///
/// Actions are queued here and applied to the session by the event loop, after
/// which the snapshot is refreshed.
#[derive(Debug)]
pub struct WizardStore {
    pub draft: EventDraft,
    pub step: Step,
    pub errors: FormErrors,
    pub sections: OpenSections,
    pub photo_path: String,
    pub notice: Option<Notice>,
    scroll_to_top: bool,
    pending: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Step and list lengths; the page is rebuilt when this changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageShape {
    pub step: Step,
    lists: Vec<usize>,
}

impl WizardStore {
    pub fn new(session: &WizardSession) -> Self {
        Self {
            draft: session.draft().clone(),
            step: session.step(),
            errors: session.errors().clone(),
            sections: session.sections().clone(),
            photo_path: String::new(),
            notice: None,
            scroll_to_top: false,
            pending: Vec::new(),
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdatePhotoPath(v) => that.photo_path = v.clone(),
                _ => that.pending.push(action.clone()),
            }
        }));
        dispatcher.register(callback);
    }

    pub fn shape(&self) -> PageShape {
        PageShape {
            step: self.step,
            lists: ListField::ALL.iter().map(|a| a.len(&self.draft)).collect(),
        }
    }

    /// Whether a navigation asked for the view to return to the top since the last call.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn refresh(&mut self, session: &WizardSession) {
        self.draft = session.draft().clone();
        self.step = session.step();
        self.errors = session.errors().clone();
        self.sections = session.sections().clone();
    }

    /// Applies the queued actions to the session, returning the draft once it
    /// passes final validation.
    ///
    /// Rejected edits become a notice instead of failing the loop.
    pub async fn apply_pending(
        that: &Rc<RefCell<Self>>,
        session: &mut WizardSession,
    ) -> Option<Box<EventDraft>> {
        let pending = std::mem::take(&mut that.borrow_mut().pending);
        let mut submitted = None;
        for action in pending {
            let photo_path = that.borrow().photo_path.clone();
            let mut scroll = false;
            let notice = match apply(session, action, &photo_path).await {
                Ok(Applied::Quiet) => None,
                Ok(Applied::Notice(notice)) => Some(notice),
                Ok(Applied::Navigated { scroll_to_top, notice }) => {
                    scroll = scroll_to_top;
                    notice
                }
                Ok(Applied::Submitted(draft)) => {
                    submitted = Some(draft);
                    None
                }
                Err(err) => {
                    tracing::warn!(%err, "wizard action rejected");
                    Some(Notice::Error(err.to_string()))
                }
            };

            let mut store = that.borrow_mut();
            store.notice = notice;
            store.scroll_to_top |= scroll;
            store.refresh(session);
        }
        submitted
    }
}

enum Applied {
    Quiet,
    Notice(Notice),
    Navigated {
        scroll_to_top: bool,
        notice: Option<Notice>,
    },
    Submitted(Box<EventDraft>),
}

async fn apply(
    session: &mut WizardSession,
    action: Action,
    photo_path: &str,
) -> Result<Applied, Error> {
    match action {
        Action::Update(update) => session.update(update).map(|_| Applied::Quiet),

        Action::UpdateAudienceMin(min) => {
            let max = session.draft().audience_range.max;
            session
                .update(FieldUpdate::AudienceRange(AudienceRange { min, max }))
                .map(|_| Applied::Quiet)
        }

        Action::UpdateAudienceMax(max) => {
            let min = session.draft().audience_range.min;
            session
                .update(FieldUpdate::AudienceRange(AudienceRange { min, max }))
                .map(|_| Applied::Quiet)
        }

        Action::AttachPhoto => {
            session.attach_photo(Path::new(photo_path.trim())).await?;
            let name = session
                .draft()
                .event_photo
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default();
            Ok(Applied::Notice(Notice::Info(format!("Attached {name}"))))
        }

        Action::ToggleSection(name) => session.toggle_section(name).await.map(|_| Applied::Quiet),

        Action::NextStep => {
            let transition = session.next().await?;
            let scroll_to_top = transition.scrolls_to_top();
            Ok(match transition {
                Transition::Submitted(draft) => Applied::Submitted(draft),
                Transition::Rejected(step) => Applied::Navigated {
                    scroll_to_top,
                    notice: Some(Notice::Error(format!(
                        "Please fix {} highlighted fields, starting on {step}",
                        session.errors().len()
                    ))),
                },
                Transition::Moved(_) | Transition::Stayed => Applied::Navigated {
                    scroll_to_top,
                    notice: None,
                },
            })
        }

        Action::PreviousStep => {
            let transition = session.previous().await?;
            Ok(Applied::Navigated {
                scroll_to_top: transition.scrolls_to_top(),
                notice: None,
            })
        }

        Action::UpdatePhotoPath(_) => Ok(Applied::Quiet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baatasari_core::{MemoryStorage, TextField};
    use std::{sync::Arc, time::Duration};

    async fn setup() -> (WizardSession, Rc<RefCell<WizardStore>>, Dispatcher) {
        let storage = Arc::new(MemoryStorage::new());
        let session = WizardSession::restore(storage, Duration::from_millis(10)).await;
        let store = Rc::new(RefCell::new(WizardStore::new(&session)));
        let mut dispatcher = Dispatcher::new();
        WizardStore::register_to(store.clone(), &mut dispatcher);
        (session, store, dispatcher)
    }

    #[tokio::test]
    async fn queued_edits_reach_the_session() {
        let (mut session, store, mut dispatcher) = setup().await;

        dispatcher.dispatch(Action::Update(FieldUpdate::Text(
            TextField::EventName,
            "Sunburn Vizag".to_string(),
        )));
        dispatcher.dispatch(Action::UpdateAudienceMax(40));
        assert!(store.borrow().draft.event_name.is_empty());

        let submitted = WizardStore::apply_pending(&store, &mut session).await;
        assert!(submitted.is_none());
        assert_eq!(session.draft().event_name, "Sunburn Vizag");
        assert_eq!(store.borrow().draft.event_name, "Sunburn Vizag");
        assert_eq!(store.borrow().draft.audience_range, AudienceRange { min: 13, max: 40 });
        assert!(session.has_pending_save());
    }

    #[tokio::test]
    async fn rejected_edit_becomes_a_notice() {
        let (mut session, store, mut dispatcher) = setup().await;

        dispatcher.dispatch(Action::UpdateAudienceMin(90));
        WizardStore::apply_pending(&store, &mut session).await;

        let store = store.borrow();
        assert!(matches!(store.notice, Some(Notice::Error(_))));
        assert_eq!(store.draft.audience_range, AudienceRange::default());
    }

    #[tokio::test]
    async fn navigation_rebuilds_the_page_shape() {
        let (mut session, store, mut dispatcher) = setup().await;
        let before = store.borrow().shape();

        dispatcher.dispatch(Action::NextStep);
        WizardStore::apply_pending(&store, &mut session).await;
        assert_eq!(store.borrow().step, Step::Ticketing);
        assert_ne!(store.borrow().shape(), before);
        assert!(store.borrow_mut().take_scroll_request());
        assert!(!store.borrow_mut().take_scroll_request());

        dispatcher.dispatch(Action::PreviousStep);
        dispatcher.dispatch(Action::Update(FieldUpdate::Push(ListField::Artists)));
        WizardStore::apply_pending(&store, &mut session).await;
        let shape = store.borrow().shape();
        assert_eq!(shape.step, Step::EventInfo);
        assert_ne!(shape, before);
    }

    #[tokio::test]
    async fn photo_path_is_local_until_attached() {
        let (mut session, store, mut dispatcher) = setup().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.txt");
        std::fs::write(&path, "not an image").unwrap();

        dispatcher.dispatch(Action::UpdatePhotoPath(path.display().to_string()));
        assert_eq!(store.borrow().photo_path, path.display().to_string());
        assert!(store.borrow().pending.is_empty());

        dispatcher.dispatch(Action::AttachPhoto);
        WizardStore::apply_pending(&store, &mut session).await;
        assert_eq!(
            store.borrow().notice,
            Some(Notice::Error(baatasari_core::PHOTO_TYPE_ERROR.to_string()))
        );
        assert!(session.draft().event_photo.is_none());
    }

    #[tokio::test]
    async fn closing_a_section_is_persisted() {
        let (mut session, store, mut dispatcher) = setup().await;

        dispatcher.dispatch(Action::ToggleSection("ticketing"));
        WizardStore::apply_pending(&store, &mut session).await;
        assert!(!store.borrow().sections.is_open("ticketing"));
        assert!(store.borrow().sections.is_open("guidelines"));
    }
}
