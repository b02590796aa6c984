// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Partial drafts that open the wizard prefilled from another page.

use serde_json::{Value, json};

use crate::error::Error;
use crate::fixtures::{ArtistRequest, ManagedEvent, RowAction, UPCOMING_HIGHLIGHT};
use crate::storage::{EVENT_FORM_DATA, LocalStorage};

/// A partial draft payload, merged over the defaults when the wizard opens.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSeed(Value);

impl DraftSeed {
    /// Prefill for the row button of a managed event. Repeating an event drops
    /// its schedule.
    pub fn for_managed_event(event: &ManagedEvent) -> Self {
        let (date, time, end_time) = match event.action() {
            RowAction::Edit => (event.date, "", ""),
            RowAction::Repeat => ("", "", ""),
        };
        Self(json!({
            "eventName": event.name,
            "category": event.category,
            "description": format!("Description for {}", event.name),
            "date": date,
            "time": time,
            "endTime": end_time,
            "venue": "",
            "googleMapsUrl": "",
            "personnel": "",
            "tagline": "",
            "contactInfo": blank_contact(),
        }))
    }

    /// Prefill for hosting an artist's requested event.
    pub fn for_artist_request(request: &ArtistRequest) -> Self {
        Self(json!({
            "eventName": request.title,
            "category": "Entertainment",
            "description": request.about,
            "venue": request.location,
            "date": "",
            "time": "",
            "endTime": "",
            "googleMapsUrl": "",
            "personnel": "",
            "tagline": "",
            "contactInfo": blank_contact(),
        }))
    }

    /// Prefill for rescheduling the highlighted upcoming event.
    pub fn for_reschedule() -> Self {
        Self(json!({
            "eventName": UPCOMING_HIGHLIGHT.name,
            "category": UPCOMING_HIGHLIGHT.category,
            "description": "Music Concert Description",
            "date": "2025-05-28",
            "time": "16:15",
            "endTime": "20:30",
            "venue": UPCOMING_HIGHLIGHT.venue,
        }))
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Replaces the stored draft with this seed.
    pub async fn store(&self, storage: &dyn LocalStorage) -> Result<(), Error> {
        tracing::debug!(seed = %self.0, "seeding event draft");
        storage.set(EVENT_FORM_DATA, &self.0.to_string()).await
    }
}

fn blank_contact() -> Value {
    json!({ "mobile": "", "email": "", "website": "", "additionalLinks": "" })
}
