// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::photo::EventPhoto;

/// The in-progress event record edited across the four wizard steps.
///
/// Serialized with the camelCase keys used by the local storage payload. Keys
/// that are absent from a stored payload fall back to the defaults below, and
/// unknown keys (including retired ones such as `ticketPrice` or `idleness`)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub event_name: String,
    pub category: String,
    pub tagline: String,
    pub description: String,
    pub personnel: String,

    pub date: String,
    pub end_date: String,
    /// Start time, formatted as "H:MM AM/PM".
    pub time: String,
    pub end_time: String,

    pub venue: String,
    pub google_maps_url: String,
    pub transport_to_event: String,
    pub entry_side: String,
    pub transport_options: TransportOptions,

    /// `None` when the stored value is blank or not a known ticket type.
    #[serde(with = "blank_as_none")]
    pub ticket_type: Option<TicketType>,
    pub audience_category: Vec<AudienceCategory>,
    pub refund_policy: String,
    pub ticket_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ticket_quantity: String,
    pub enable_offers: bool,
    #[serde(with = "blank_as_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(deserialize_with = "lenient_string")]
    pub discount_amount: String,
    pub discount_code: String,
    pub guidelines: String,
    pub add_ons: AddOns,

    pub sponsors: Sponsors,
    pub contact_info: ContactInfo,

    pub requirements: Requirements,
    pub post_event_follow_up: PostEventFollowUp,

    pub target_audience: BTreeMap<String, bool>,
    pub audience_range: AudienceRange,
    pub event_photo: Option<EventPhoto>,
    pub media: String,
    pub artists: Vec<ArtistSlot>,
    pub chef_guests: Vec<ChefGuest>,
    pub attractions: Vec<Attraction>,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            category: String::new(),
            tagline: String::new(),
            description: String::new(),
            personnel: String::new(),
            date: String::new(),
            end_date: String::new(),
            time: String::new(),
            end_time: String::new(),
            venue: String::new(),
            google_maps_url: String::new(),
            transport_to_event: String::new(),
            entry_side: String::new(),
            transport_options: TransportOptions::default(),
            ticket_type: Some(TicketType::Paid),
            audience_category: vec![AudienceCategory::default()],
            refund_policy: String::new(),
            ticket_name: String::new(),
            ticket_quantity: String::new(),
            enable_offers: false,
            discount_type: None,
            discount_amount: String::new(),
            discount_code: String::new(),
            guidelines: String::new(),
            add_ons: AddOns::default(),
            sponsors: Sponsors::default(),
            contact_info: ContactInfo::default(),
            requirements: Requirements::default(),
            post_event_follow_up: PostEventFollowUp::default(),
            target_audience: default_target_audience(),
            audience_range: AudienceRange::default(),
            event_photo: None,
            media: String::new(),
            artists: vec![ArtistSlot::default()],
            chef_guests: vec![ChefGuest::default()],
            attractions: vec![Attraction::default()],
        }
    }
}

impl EventDraft {
    /// Shallow-merges a stored JSON object over this draft.
    ///
    /// Every top-level key present in `stored` replaces the current value as a
    /// whole; nested objects are not merged. A `null` value resets the key to
    /// its default.
    pub fn merge_json(&self, stored: &str) -> Result<EventDraft, Error> {
        let patch: serde_json::Value = serde_json::from_str(stored)?;
        let serde_json::Value::Object(patch) = patch else {
            return Err(Error::invalid("draft", "stored draft is not a JSON object"));
        };

        let mut base = match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(Error::invalid("draft", "draft did not serialize to an object")),
        };
        for (key, value) in patch {
            match value {
                serde_json::Value::Null => base.remove(&key),
                value => base.insert(key, value),
            };
        }

        let mut merged: EventDraft = serde_json::from_value(serde_json::Value::Object(base))?;
        merged.normalize();
        Ok(merged)
    }

    /// Restores the list invariants after loading foreign data.
    pub(crate) fn normalize(&mut self) {
        if self.audience_category.is_empty() {
            self.audience_category.push(AudienceCategory::default());
        }
    }

    pub(crate) fn is_paid(&self) -> bool {
        self.ticket_type == Some(TicketType::Paid)
    }
}

/// Whether attendees pay for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TicketType {
    Paid,
    Free,
}

const TICKET_PAID: &str = "paid";
const TICKET_FREE: &str = "free";

impl AsRef<str> for TicketType {
    fn as_ref(&self) -> &str {
        match self {
            TicketType::Paid => TICKET_PAID,
            TicketType::Free => TICKET_FREE,
        }
    }
}

impl Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TicketType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            TICKET_PAID => Ok(TicketType::Paid),
            TICKET_FREE => Ok(TicketType::Free),
            _ => Err(()),
        }
    }
}

/// How an offer reduces the ticket price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DiscountType {
    Flat,
    Percentage,
}

const DISCOUNT_FLAT: &str = "flat";
const DISCOUNT_PERCENTAGE: &str = "percentage";

impl AsRef<str> for DiscountType {
    fn as_ref(&self) -> &str {
        match self {
            DiscountType::Flat => DISCOUNT_FLAT,
            DiscountType::Percentage => DISCOUNT_PERCENTAGE,
        }
    }
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for DiscountType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            DISCOUNT_FLAT => Ok(DiscountType::Flat),
            DISCOUNT_PERCENTAGE => Ok(DiscountType::Percentage),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportOptions {
    pub public_transport: bool,
    pub own_vehicles: bool,
    pub third_party_app: bool,
    pub local_private_transport: bool,
}

/// One of the fixed transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    PublicTransport,
    OwnVehicles,
    ThirdPartyApp,
    LocalPrivateTransport,
}

impl Transport {
    pub const ALL: [Transport; 4] = [
        Transport::PublicTransport,
        Transport::OwnVehicles,
        Transport::ThirdPartyApp,
        Transport::LocalPrivateTransport,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Transport::PublicTransport => "publicTransport",
            Transport::OwnVehicles => "ownVehicles",
            Transport::ThirdPartyApp => "thirdPartyApp",
            Transport::LocalPrivateTransport => "localPrivateTransport",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Transport::PublicTransport => "Public Transport",
            Transport::OwnVehicles => "Own Vehicles",
            Transport::ThirdPartyApp => "Third-Party App",
            Transport::LocalPrivateTransport => "Local Private Transport",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl TransportOptions {
    pub fn get(&self, option: Transport) -> bool {
        match option {
            Transport::PublicTransport => self.public_transport,
            Transport::OwnVehicles => self.own_vehicles,
            Transport::ThirdPartyApp => self.third_party_app,
            Transport::LocalPrivateTransport => self.local_private_transport,
        }
    }

    pub fn set(&mut self, option: Transport, value: bool) {
        let slot = match option {
            Transport::PublicTransport => &mut self.public_transport,
            Transport::OwnVehicles => &mut self.own_vehicles,
            Transport::ThirdPartyApp => &mut self.third_party_app,
            Transport::LocalPrivateTransport => &mut self.local_private_transport,
        };
        *slot = value;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceCategory {
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    pub description: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOns {
    pub freebies: bool,
    pub gift_hampers: bool,
    pub merchandise: bool,
    pub add_other: bool,
    pub gift_hampers_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_other_description: Option<String>,
}

/// One of the fixed add-on switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOn {
    Freebies,
    GiftHampers,
    Merchandise,
    AddOther,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [
        AddOn::Freebies,
        AddOn::GiftHampers,
        AddOn::Merchandise,
        AddOn::AddOther,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AddOn::Freebies => "freebies",
            AddOn::GiftHampers => "giftHampers",
            AddOn::Merchandise => "merchandise",
            AddOn::AddOther => "addOther",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AddOn::Freebies => "Freebies",
            AddOn::GiftHampers => "Gift Hampers",
            AddOn::Merchandise => "Merchandise",
            AddOn::AddOther => "Add Other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

impl AddOns {
    pub fn get(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::Freebies => self.freebies,
            AddOn::GiftHampers => self.gift_hampers,
            AddOn::Merchandise => self.merchandise,
            AddOn::AddOther => self.add_other,
        }
    }

    pub fn set(&mut self, add_on: AddOn, value: bool) {
        let slot = match add_on {
            AddOn::Freebies => &mut self.freebies,
            AddOn::GiftHampers => &mut self.gift_hampers,
            AddOn::Merchandise => &mut self.merchandise,
            AddOn::AddOther => &mut self.add_other,
        };
        *slot = value;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    pub name: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sponsors {
    pub title_sponsors: Vec<Sponsor>,
    pub co_partners: Vec<Sponsor>,
    pub media_partners: Vec<Sponsor>,
}

impl Default for Sponsors {
    fn default() -> Self {
        Self {
            title_sponsors: vec![Sponsor::default()],
            co_partners: vec![Sponsor::default()],
            media_partners: vec![Sponsor::default()],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub mobile: String,
    pub email: String,
    pub website: String,
    pub additional_links: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StallPrice {
    pub stall_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub stall_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirements {
    pub artists: String,
    pub stalls_availability: String,
    pub stalls_prices: Vec<StallPrice>,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            artists: String::new(),
            stalls_availability: String::new(),
            stalls_prices: vec![StallPrice::default(), StallPrice::default()],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostEventFollowUp {
    pub thank_you_note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceRange {
    pub min: u32,
    pub max: u32,
}

impl Default for AudienceRange {
    fn default() -> Self {
        Self { min: 13, max: 86 }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistSlot {
    pub name: String,
    pub genre: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChefGuest {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attraction {
    pub name: String,
    pub description: String,
}

/// Audience tags offered by the ticketing page, in display order.
pub const TARGET_AUDIENCE_TAGS: [&str; 6] = [
    "Entrepreneurs",
    "High School Learners",
    "University Scholars",
    "Artists",
    "Singers",
    "General Public",
];

fn default_target_audience() -> BTreeMap<String, bool> {
    TARGET_AUDIENCE_TAGS
        .iter()
        .map(|tag| {
            let on = matches!(*tag, "University Scholars" | "General Public");
            (tag.to_string(), on)
        })
        .collect()
}

/// Stores `None` as an empty string and reads blank or unrecognized strings back as `None`.
mod blank_as_none {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.trim().parse().ok()))
    }
}

/// Accepts numbers where a text input value is expected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Nothing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Nothing(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_matches_initial_form_state() {
        let draft = EventDraft::default();

        assert_eq!(draft.ticket_type, Some(TicketType::Paid));
        assert_eq!(draft.discount_type, None);
        assert!(!draft.enable_offers);
        assert_eq!(draft.audience_category.len(), 1);
        assert_eq!(draft.requirements.stalls_prices.len(), 2);
        assert_eq!(draft.sponsors.title_sponsors.len(), 1);
        assert_eq!(draft.audience_range, AudienceRange { min: 13, max: 86 });
        assert_eq!(draft.target_audience.get("University Scholars"), Some(&true));
        assert_eq!(draft.target_audience.get("General Public"), Some(&true));
        assert_eq!(draft.target_audience.get("Singers"), Some(&false));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(EventDraft::default()).unwrap();
        assert_eq!(json["ticketType"], "paid");
        assert_eq!(json["discountType"], "");
        assert_eq!(json["postEventFollowUp"]["thankYouNote"], "");
        assert_eq!(json["transportOptions"]["thirdPartyApp"], false);
        assert!(json["addOns"].get("addOtherDescription").is_none());
    }

    #[test]
    fn merge_replaces_top_level_keys_only() {
        let mut base = EventDraft::default();
        base.contact_info.website = "https://example.org".to_string();
        base.venue = "Novotel".to_string();

        let merged = base
            .merge_json(r#"{"eventName":"Beach Night","contactInfo":{"email":"a@b.com"}}"#)
            .unwrap();

        assert_eq!(merged.event_name, "Beach Night");
        assert_eq!(merged.venue, "Novotel");
        assert_eq!(merged.contact_info.email, "a@b.com");
        assert_eq!(merged.contact_info.website, ""); // whole object replaced
    }

    #[test]
    fn merge_ignores_retired_keys() {
        let merged = EventDraft::default()
            .merge_json(r#"{"ticketPrice":"100","idleness":"x","type":"old","titleSponsors":[]}"#)
            .unwrap();
        assert_eq!(merged, EventDraft::default());
    }

    #[test]
    fn merge_reads_unknown_ticket_type_as_unset() {
        let merged = EventDraft::default()
            .merge_json(r#"{"ticketType":"vip","discountType":"flat"}"#)
            .unwrap();
        assert_eq!(merged.ticket_type, None);
        assert_eq!(merged.discount_type, Some(DiscountType::Flat));
    }

    #[test]
    fn merge_accepts_numeric_inputs() {
        let stored = r#"{"ticketQuantity":250,"audienceCategory":[{"category":"VIP","price":499}]}"#;
        let merged = EventDraft::default().merge_json(stored).unwrap();
        assert_eq!(merged.ticket_quantity, "250");
        assert_eq!(merged.audience_category[0].price, "499");
        assert_eq!(merged.audience_category[0].description, "");
    }

    #[test]
    fn merge_keeps_one_audience_category() {
        let merged = EventDraft::default()
            .merge_json(r#"{"audienceCategory":[]}"#)
            .unwrap();
        assert_eq!(merged.audience_category, vec![AudienceCategory::default()]);
    }

    #[test]
    fn merge_null_resets_to_default() {
        let mut base = EventDraft::default();
        base.tagline = "Waves".to_string();
        let merged = base.merge_json(r#"{"tagline":null}"#).unwrap();
        assert_eq!(merged.tagline, "");
    }

    #[test]
    fn merge_rejects_non_objects() {
        assert!(EventDraft::default().merge_json("[1,2]").is_err());
        assert!(EventDraft::default().merge_json("{not json").is_err());
    }
}
