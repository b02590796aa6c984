// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the Baatasari event organizer console.
//!
//! The event draft and its typed updates, the validator, the four-step wizard
//! with its persisted session, and the page states built on local storage.

mod analytics;
mod approvals;
mod config;
mod draft;
mod error;
pub mod fixtures;
mod organizer;
mod photo;
mod seed;
mod session;
pub mod storage;
mod update;
mod validate;
mod wizard;

#[cfg(test)]
mod tests_utils;

pub use crate::analytics::{
    AnalyticsProjection, EventOverview, Metric, Period, SeriesPoint, format_value,
};
pub use crate::approvals::{ApprovedStalls, Notification};
pub use crate::config::{APP_NAME, Config, ConfigDuration, get_config_dir};
pub use crate::draft::{
    AddOn, AddOns, ArtistSlot, Attraction, AudienceCategory, AudienceRange, ChefGuest,
    ContactInfo, DiscountType, EventDraft, PostEventFollowUp, Requirements, Sponsor, Sponsors,
    StallPrice, TARGET_AUDIENCE_TAGS, TicketType, Transport, TransportOptions,
};
pub use crate::error::Error;
pub use crate::organizer::Organizer;
pub use crate::photo::{EventPhoto, MAX_PHOTO_SIZE, PHOTO_SIZE_ERROR, PHOTO_TYPE_ERROR};
pub use crate::seed::DraftSeed;
pub use crate::session::{DEFAULT_DRAFT_DEBOUNCE, Debouncer, WizardSession};
pub use crate::storage::{LocalStorage, MemoryStorage, SqliteStorage};
pub use crate::update::{
    EntryKey, FieldUpdate, ListField, MOBILE_PREFIX, TextField, normalize_mobile,
};
pub use crate::validate::{FormErrors, js_number, validate};
pub use crate::wizard::{OpenSections, SECTIONS, Step, Transition, Wizard};
