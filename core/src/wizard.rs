// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::draft::EventDraft;
use crate::validate::{FormErrors, validate};

/// One of the four wizard pages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    EventInfo,
    Ticketing,
    Sponsorship,
    Final,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::EventInfo, Step::Ticketing, Step::Sponsorship, Step::Final];

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        match self {
            Step::EventInfo => 1,
            Step::Ticketing => 2,
            Step::Sponsorship => 3,
            Step::Final => 4,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(Step::EventInfo),
            2 => Some(Step::Ticketing),
            3 => Some(Step::Sponsorship),
            4 => Some(Step::Final),
            _ => None,
        }
    }

    /// Parses a stored step number, reading a leading integer like a browser
    /// `parseInt` does.
    pub fn parse_stored(value: &str) -> Option<Self> {
        let s = value.trim_start();
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s.strip_prefix('+').unwrap_or(s)),
        };
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let n: i64 = rest[..end].parse().ok()?;
        Self::from_number(sign * n)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::EventInfo => "Event Details",
            Step::Ticketing => "Ticketing",
            Step::Sponsorship => "Sponsorship & Contact",
            Step::Final => "Final Details",
        }
    }

    /// Field path prefixes owned by the step.
    pub fn field_prefixes(self) -> &'static [&'static str] {
        match self {
            Step::EventInfo => &[
                "eventName",
                "category",
                "tagline",
                "description",
                "personnel",
                "date",
                "time",
                "endTime",
                "venue",
                "googleMapsUrl",
                "transportToEvent",
                "entrySide",
            ],
            Step::Ticketing => &[
                "ticketType",
                "ticketName",
                "ticketQuantity",
                "audienceCategory",
                "refundPolicy",
                "discountType",
                "discountAmount",
                "discountCode",
                "guidelines",
                "addOns.giftHampersDescription",
            ],
            Step::Sponsorship => &[
                "contactInfo.mobile",
                "contactInfo.email",
                "sponsors.titleSponsors",
                "sponsors.coPartners",
                "sponsors.mediaPartners",
            ],
            Step::Final => &[
                "requirements.artists",
                "requirements.stallsAvailability",
                "requirements.stallsPrices",
                "postEventFollowUp.thankYouNote",
            ],
        }
    }

    /// Earliest step owning any of the error keys, the first step if none match.
    pub fn first_with_errors(errors: &FormErrors) -> Step {
        Step::ALL
            .into_iter()
            .find(|step| {
                errors.keys().any(|key| {
                    step.field_prefixes()
                        .iter()
                        .any(|prefix| key.starts_with(prefix))
                })
            })
            .unwrap_or_default()
    }

    fn next(self) -> Option<Step> {
        Step::from_number(i64::from(self.number()) + 1)
    }

    fn previous(self) -> Option<Step> {
        Step::from_number(i64::from(self.number()) - 1)
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.title())
    }
}

/// Names of the collapsible sections, in page order.
pub const SECTIONS: [&str; 13] = [
    "event-info",
    "date-time",
    "event-highlights",
    "photo-media",
    "ticketing",
    "sponsorship",
    "requirements",
    "postEvent",
    "contactInfo",
    "audience",
    "guidelines",
    "addOns",
    "discounts",
];

/// Open/closed state of the collapsible sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenSections(BTreeMap<String, bool>);

impl Default for OpenSections {
    fn default() -> Self {
        Self(SECTIONS.iter().map(|a| (a.to_string(), true)).collect())
    }
}

impl OpenSections {
    pub fn is_open(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Flips the named section and returns its new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        let open = !self.is_open(name);
        self.0.insert(name.to_string(), open);
        open
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Outcome of a wizard navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Moved to another step.
    Moved(Step),
    /// Final validation failed and the wizard jumped to the earliest failing step.
    Rejected(Step),
    /// The draft passed final validation.
    Submitted(Box<EventDraft>),
    /// Already at the first step.
    Stayed,
}

impl Transition {
    /// Whether the view should scroll back to the top of the form.
    pub fn scrolls_to_top(&self) -> bool {
        matches!(self, Transition::Moved(_) | Transition::Rejected(_))
    }
}

/// Step, section and error state of the event wizard.
#[derive(Debug, Default, Clone)]
pub struct Wizard {
    step: Step,
    sections: OpenSections,
    errors: FormErrors,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(step: Step, sections: OpenSections) -> Self {
        Self {
            step,
            sections,
            errors: FormErrors::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn sections(&self) -> &OpenSections {
        &self.sections
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Advances one step, or validates the draft on the final step.
    pub fn next(&mut self, draft: &EventDraft) -> Transition {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                self.errors.clear();
                Transition::Moved(step)
            }
            None => {
                self.errors = validate(draft);
                if self.errors.is_empty() {
                    tracing::info!(event = %draft.event_name, "event submitted");
                    Transition::Submitted(Box::new(draft.clone()))
                } else {
                    self.step = Step::first_with_errors(&self.errors);
                    tracing::debug!(
                        step = self.step.number(),
                        errors = self.errors.len(),
                        "final validation failed"
                    );
                    Transition::Rejected(self.step)
                }
            }
        }
    }

    /// Goes back one step. Errors are kept.
    pub fn previous(&mut self) -> Transition {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                Transition::Moved(step)
            }
            None => Transition::Stayed,
        }
    }

    pub fn toggle_section(&mut self, name: &str) -> bool {
        self.sections.toggle(name)
    }
}
