// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared by the unit tests.

use crate::draft::{AudienceCategory, EventDraft, StallPrice};

/// A paid draft that passes validation.
pub fn complete_draft() -> EventDraft {
    let mut draft = EventDraft::default();
    draft.event_name = "Beach Music Night".to_string();
    draft.category = "Entertainment".to_string();
    draft.tagline = "Waves and beats".to_string();
    draft.description = "An open-air music celebration.".to_string();
    draft.personnel = "Stage crew".to_string();
    draft.date = "2025-07-12".to_string();
    draft.time = "6:00 PM".to_string();
    draft.end_time = "11:00 PM".to_string();
    draft.venue = "Beach Arena".to_string();
    draft.entry_side = "North gate".to_string();
    draft.audience_category = vec![AudienceCategory {
        category: "General".to_string(),
        price: "499".to_string(),
        description: "Standing".to_string(),
    }];
    draft.refund_policy = "No refunds".to_string();
    draft.ticket_name = "Entry pass".to_string();
    draft.ticket_quantity = "200".to_string();
    draft.guidelines = "No outside food".to_string();
    draft.contact_info.mobile = "+91 9876543210".to_string();
    draft.contact_info.email = "hello@example.com".to_string();
    draft.requirements.artists = "Two DJs".to_string();
    draft.requirements.stalls_availability = "Ten stalls".to_string();
    draft.requirements.stalls_prices = vec![StallPrice {
        stall_type: "Food".to_string(),
        stall_price: "1500".to_string(),
    }];
    draft.post_event_follow_up.thank_you_note = "Thanks for coming!".to_string();
    draft
}

