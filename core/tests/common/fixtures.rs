// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use baatasari_core::{Config, EventDraft, FieldUpdate};

/// Creates a configuration storing its database under `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        ..Config::default()
    }
}

/// Dotted paths and values that make the default draft submittable.
#[must_use]
pub fn complete_updates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("eventName", "Beach Music Night"),
        ("category", "Entertainment"),
        ("tagline", "Waves and beats"),
        ("description", "An open-air music celebration."),
        ("personnel", "Stage crew"),
        ("date", "2025-07-12"),
        ("time", "6:00 PM"),
        ("endTime", "11:00 PM"),
        ("venue", "Beach Arena"),
        ("entrySide", "North gate"),
        ("audienceCategory.0.category", "General"),
        ("audienceCategory.0.price", "499"),
        ("audienceCategory.0.description", "Standing"),
        ("refundPolicy", "No refunds"),
        ("ticketName", "Entry pass"),
        ("ticketQuantity", "200"),
        ("guidelines", "No outside food"),
        ("contactInfo.mobile", "9876543210"),
        ("contactInfo.email", "hello@example.com"),
        ("requirements.artists", "Two DJs"),
        ("requirements.stallsAvailability", "Ten stalls"),
        ("requirements.stallsPrices.0.stallType", "Food"),
        ("requirements.stallsPrices.0.stallPrice", "1500"),
        ("requirements.stallsPrices.1.stallType", "Beverage"),
        ("requirements.stallsPrices.1.stallPrice", "900"),
        ("postEventFollowUp.thankYouNote", "Thanks for coming!"),
    ]
}

/// Applies textual updates in order, panicking on the first rejected one.
pub fn apply_all(draft: &mut EventDraft, updates: &[(&str, &str)]) {
    for (path, value) in updates {
        let update = FieldUpdate::parse(path, value)
            .unwrap_or_else(|e| panic!("failed to parse update for {path}: {e}"));
        draft
            .update(update)
            .unwrap_or_else(|e| panic!("failed to apply update for {path}: {e}"));
    }
}

/// A paid draft that passes validation.
#[must_use]
pub fn complete_draft() -> EventDraft {
    let mut draft = EventDraft::default();
    apply_all(&mut draft, &complete_updates());
    draft
}
