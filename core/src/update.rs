// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::draft::{
    AddOn, ArtistSlot, Attraction, AudienceCategory, AudienceRange, ChefGuest, DiscountType,
    EventDraft, Sponsor, StallPrice, TicketType, Transport,
};
use crate::error::Error;
use crate::photo::EventPhoto;

/// Prefix every stored mobile number carries.
pub const MOBILE_PREFIX: &str = "+91 ";

const MOBILE_MAX_DIGITS: usize = 10;

/// A single edit to an event draft.
///
/// Each variant touches one leaf (or one list) of the draft; sibling fields are
/// left untouched apart from the documented side effects of ticket type and
/// offer switches.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Text(TextField, String),
    /// Switching to free tickets resets the audience categories and refund policy.
    TicketType(TicketType),
    DiscountType(Option<DiscountType>),
    /// Turning offers off clears the ticket and discount inputs.
    EnableOffers(bool),
    Transport(Transport, bool),
    AddOn(AddOn, bool),
    TargetAudience(String, bool),
    AudienceRange(AudienceRange),
    Photo(Option<EventPhoto>),
    Push(ListField),
    Remove(ListField, usize),
}

impl FieldUpdate {
    /// Builds an update from a dotted field path and a textual value.
    ///
    /// Unknown paths are rejected instead of being ignored.
    pub fn parse(path: &str, value: &str) -> Result<Self, Error> {
        match path {
            "ticketType" => value
                .trim()
                .parse()
                .map(FieldUpdate::TicketType)
                .map_err(|_| Error::invalid(path, "expected `paid` or `free`")),

            "discountType" => match value.trim() {
                "" => Ok(FieldUpdate::DiscountType(None)),
                v => v
                    .parse()
                    .map(|a| FieldUpdate::DiscountType(Some(a)))
                    .map_err(|_| Error::invalid(path, "expected `flat` or `percentage`")),
            },

            "enableOffers" => parse_bool(path, value).map(FieldUpdate::EnableOffers),

            "audienceRange" => parse_range(path, value).map(FieldUpdate::AudienceRange),

            "eventPhoto" => match value.trim() {
                "" => Ok(FieldUpdate::Photo(None)),
                _ => Err(Error::invalid(path, "photos are attached from a file")),
            },

            _ => {
                if let Some(key) = path.strip_prefix("transportOptions.") {
                    let option = Transport::from_key(key)
                        .ok_or_else(|| Error::UnknownField(path.to_string()))?;
                    return parse_bool(path, value).map(|v| FieldUpdate::Transport(option, v));
                }

                if let Some(key) = path.strip_prefix("addOns.")
                    && let Some(add_on) = AddOn::from_key(key)
                {
                    return parse_bool(path, value).map(|v| FieldUpdate::AddOn(add_on, v));
                }

                if let Some(tag) = path.strip_prefix("targetAudience.") {
                    return parse_bool(path, value)
                        .map(|v| FieldUpdate::TargetAudience(tag.to_string(), v));
                }

                let field: TextField = path.parse()?;
                Ok(FieldUpdate::Text(field, value.to_string()))
            }
        }
    }

    /// Applies the update in place. On error the draft is unchanged.
    pub fn apply(self, draft: &mut EventDraft) -> Result<(), Error> {
        match self {
            FieldUpdate::Text(field, value) => {
                let value = match field {
                    TextField::ContactMobile => normalize_mobile(&value)?,
                    _ => value,
                };
                *field.slot_mut(draft)? = value;
            }

            FieldUpdate::TicketType(ticket_type) => {
                draft.ticket_type = Some(ticket_type);
                if ticket_type == TicketType::Free {
                    draft.audience_category = vec![AudienceCategory::default()];
                    draft.refund_policy.clear();
                }
            }

            FieldUpdate::DiscountType(discount_type) => draft.discount_type = discount_type,

            FieldUpdate::EnableOffers(enable) => {
                if draft.enable_offers && !enable {
                    draft.ticket_name.clear();
                    draft.ticket_quantity.clear();
                    draft.discount_type = None;
                    draft.discount_amount.clear();
                    draft.discount_code.clear();
                }
                draft.enable_offers = enable;
            }

            FieldUpdate::Transport(option, value) => draft.transport_options.set(option, value),

            FieldUpdate::AddOn(add_on, value) => draft.add_ons.set(add_on, value),

            FieldUpdate::TargetAudience(tag, value) => {
                draft.target_audience.insert(tag, value);
            }

            FieldUpdate::AudienceRange(range) => {
                if range.min > range.max {
                    return Err(Error::invalid(
                        "audienceRange",
                        format!("minimum {} exceeds maximum {}", range.min, range.max),
                    ));
                }
                draft.audience_range = range;
            }

            FieldUpdate::Photo(photo) => draft.event_photo = photo,

            FieldUpdate::Push(list) => list.push(draft),

            FieldUpdate::Remove(list, index) => {
                let len = list.len(draft);
                if index >= len {
                    return Err(Error::IndexOutOfRange {
                        field: list.to_string(),
                        index,
                        len,
                    });
                }
                if list == ListField::AudienceCategory && len == 1 {
                    return Err(Error::Refused(
                        "At least one audience category is required".to_string(),
                    ));
                }
                list.remove(draft, index);
            }
        }
        Ok(())
    }
}

impl EventDraft {
    /// Applies an update in place.
    pub fn update(&mut self, update: FieldUpdate) -> Result<(), Error> {
        update.apply(self)
    }

    /// Returns an updated copy, leaving `self` untouched.
    pub fn with(&self, update: FieldUpdate) -> Result<EventDraft, Error> {
        let mut draft = self.clone();
        update.apply(&mut draft)?;
        Ok(draft)
    }
}

/// A text leaf of the draft, addressed by its dotted path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    EventName,
    Category,
    Tagline,
    Description,
    Personnel,
    Date,
    EndDate,
    Time,
    EndTime,
    Venue,
    GoogleMapsUrl,
    TransportToEvent,
    EntrySide,
    RefundPolicy,
    TicketName,
    TicketQuantity,
    DiscountAmount,
    DiscountCode,
    Guidelines,
    GiftHampersDescription,
    AddOtherDescription,
    ContactMobile,
    ContactEmail,
    ContactWebsite,
    ContactAdditionalLinks,
    RequirementsArtists,
    StallsAvailability,
    ThankYouNote,
    Media,
    /// A text field inside an entry of a list.
    Entry(ListField, usize, EntryKey),
}

const SIMPLE_FIELDS: [(TextField, &str); 29] = [
    (TextField::EventName, "eventName"),
    (TextField::Category, "category"),
    (TextField::Tagline, "tagline"),
    (TextField::Description, "description"),
    (TextField::Personnel, "personnel"),
    (TextField::Date, "date"),
    (TextField::EndDate, "endDate"),
    (TextField::Time, "time"),
    (TextField::EndTime, "endTime"),
    (TextField::Venue, "venue"),
    (TextField::GoogleMapsUrl, "googleMapsUrl"),
    (TextField::TransportToEvent, "transportToEvent"),
    (TextField::EntrySide, "entrySide"),
    (TextField::RefundPolicy, "refundPolicy"),
    (TextField::TicketName, "ticketName"),
    (TextField::TicketQuantity, "ticketQuantity"),
    (TextField::DiscountAmount, "discountAmount"),
    (TextField::DiscountCode, "discountCode"),
    (TextField::Guidelines, "guidelines"),
    (TextField::GiftHampersDescription, "addOns.giftHampersDescription"),
    (TextField::AddOtherDescription, "addOns.addOtherDescription"),
    (TextField::ContactMobile, "contactInfo.mobile"),
    (TextField::ContactEmail, "contactInfo.email"),
    (TextField::ContactWebsite, "contactInfo.website"),
    (TextField::ContactAdditionalLinks, "contactInfo.additionalLinks"),
    (TextField::RequirementsArtists, "requirements.artists"),
    (TextField::StallsAvailability, "requirements.stallsAvailability"),
    (TextField::ThankYouNote, "postEventFollowUp.thankYouNote"),
    (TextField::Media, "media"),
];

impl TextField {
    /// Reads the current value of the field.
    pub fn get<'a>(&self, draft: &'a EventDraft) -> Result<&'a str, Error> {
        use TextField::*;
        Ok(match self {
            EventName => &draft.event_name,
            Category => &draft.category,
            Tagline => &draft.tagline,
            Description => &draft.description,
            Personnel => &draft.personnel,
            Date => &draft.date,
            EndDate => &draft.end_date,
            Time => &draft.time,
            EndTime => &draft.end_time,
            Venue => &draft.venue,
            GoogleMapsUrl => &draft.google_maps_url,
            TransportToEvent => &draft.transport_to_event,
            EntrySide => &draft.entry_side,
            RefundPolicy => &draft.refund_policy,
            TicketName => &draft.ticket_name,
            TicketQuantity => &draft.ticket_quantity,
            DiscountAmount => &draft.discount_amount,
            DiscountCode => &draft.discount_code,
            Guidelines => &draft.guidelines,
            GiftHampersDescription => &draft.add_ons.gift_hampers_description,
            AddOtherDescription => draft.add_ons.add_other_description.as_deref().unwrap_or(""),
            ContactMobile => &draft.contact_info.mobile,
            ContactEmail => &draft.contact_info.email,
            ContactWebsite => &draft.contact_info.website,
            ContactAdditionalLinks => &draft.contact_info.additional_links,
            RequirementsArtists => &draft.requirements.artists,
            StallsAvailability => &draft.requirements.stalls_availability,
            ThankYouNote => &draft.post_event_follow_up.thank_you_note,
            Media => &draft.media,
            Entry(list, index, key) => list.entry(draft, *index, *key)?,
        })
    }

    fn slot_mut<'a>(&self, draft: &'a mut EventDraft) -> Result<&'a mut String, Error> {
        use TextField::*;
        Ok(match self {
            EventName => &mut draft.event_name,
            Category => &mut draft.category,
            Tagline => &mut draft.tagline,
            Description => &mut draft.description,
            Personnel => &mut draft.personnel,
            Date => &mut draft.date,
            EndDate => &mut draft.end_date,
            Time => &mut draft.time,
            EndTime => &mut draft.end_time,
            Venue => &mut draft.venue,
            GoogleMapsUrl => &mut draft.google_maps_url,
            TransportToEvent => &mut draft.transport_to_event,
            EntrySide => &mut draft.entry_side,
            RefundPolicy => &mut draft.refund_policy,
            TicketName => &mut draft.ticket_name,
            TicketQuantity => &mut draft.ticket_quantity,
            DiscountAmount => &mut draft.discount_amount,
            DiscountCode => &mut draft.discount_code,
            Guidelines => &mut draft.guidelines,
            GiftHampersDescription => &mut draft.add_ons.gift_hampers_description,
            AddOtherDescription => draft
                .add_ons
                .add_other_description
                .get_or_insert_with(String::new),
            ContactMobile => &mut draft.contact_info.mobile,
            ContactEmail => &mut draft.contact_info.email,
            ContactWebsite => &mut draft.contact_info.website,
            ContactAdditionalLinks => &mut draft.contact_info.additional_links,
            RequirementsArtists => &mut draft.requirements.artists,
            StallsAvailability => &mut draft.requirements.stalls_availability,
            ThankYouNote => &mut draft.post_event_follow_up.thank_you_note,
            Media => &mut draft.media,
            Entry(list, index, key) => list.entry_mut(draft, *index, *key)?,
        })
    }
}

impl Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextField::Entry(list, index, key) => write!(f, "{list}.{index}.{key}"),
            simple => {
                let (_, path) = SIMPLE_FIELDS
                    .iter()
                    .find(|(field, _)| field == simple)
                    .ok_or(fmt::Error)?;
                write!(f, "{path}")
            }
        }
    }
}

impl FromStr for TextField {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if let Some((field, _)) = SIMPLE_FIELDS.iter().find(|(_, p)| *p == path) {
            return Ok(*field);
        }

        let unknown = || Error::UnknownField(path.to_string());
        for list in ListField::ALL {
            let Some(rest) = path
                .strip_prefix(list.path())
                .and_then(|a| a.strip_prefix('.'))
            else {
                continue;
            };

            let (index, key) = rest.split_once('.').ok_or_else(unknown)?;
            let index: usize = index.parse().map_err(|_| unknown())?;
            let key = EntryKey::from_str(key).map_err(|_| unknown())?;
            if !list.keys().contains(&key) {
                return Err(unknown());
            }
            return Ok(TextField::Entry(list, index, key));
        }

        Err(unknown())
    }
}

/// A list of repeatable entries inside the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    AudienceCategory,
    TitleSponsors,
    CoPartners,
    MediaPartners,
    StallsPrices,
    Artists,
    ChefGuests,
    Attractions,
}

impl ListField {
    pub const ALL: [ListField; 8] = [
        ListField::AudienceCategory,
        ListField::TitleSponsors,
        ListField::CoPartners,
        ListField::MediaPartners,
        ListField::StallsPrices,
        ListField::Artists,
        ListField::ChefGuests,
        ListField::Attractions,
    ];

    /// Dotted path of the list itself.
    pub fn path(self) -> &'static str {
        match self {
            ListField::AudienceCategory => "audienceCategory",
            ListField::TitleSponsors => "sponsors.titleSponsors",
            ListField::CoPartners => "sponsors.coPartners",
            ListField::MediaPartners => "sponsors.mediaPartners",
            ListField::StallsPrices => "requirements.stallsPrices",
            ListField::Artists => "artists",
            ListField::ChefGuests => "chefGuests",
            ListField::Attractions => "attractions",
        }
    }

    /// Text keys each entry of the list carries.
    pub fn keys(self) -> &'static [EntryKey] {
        use EntryKey::*;
        match self {
            ListField::AudienceCategory => &[Category, Price, Description],
            ListField::TitleSponsors | ListField::CoPartners | ListField::MediaPartners => {
                &[Name, Website]
            }
            ListField::StallsPrices => &[StallType, StallPrice],
            ListField::Artists => &[Name, Genre],
            ListField::ChefGuests => &[Name, Specialty],
            ListField::Attractions => &[Name, Description],
        }
    }

    pub fn len(self, draft: &EventDraft) -> usize {
        match self {
            ListField::AudienceCategory => draft.audience_category.len(),
            ListField::TitleSponsors => draft.sponsors.title_sponsors.len(),
            ListField::CoPartners => draft.sponsors.co_partners.len(),
            ListField::MediaPartners => draft.sponsors.media_partners.len(),
            ListField::StallsPrices => draft.requirements.stalls_prices.len(),
            ListField::Artists => draft.artists.len(),
            ListField::ChefGuests => draft.chef_guests.len(),
            ListField::Attractions => draft.attractions.len(),
        }
    }

    fn push(self, draft: &mut EventDraft) {
        match self {
            ListField::AudienceCategory => draft.audience_category.push(Default::default()),
            ListField::TitleSponsors => draft.sponsors.title_sponsors.push(Default::default()),
            ListField::CoPartners => draft.sponsors.co_partners.push(Default::default()),
            ListField::MediaPartners => draft.sponsors.media_partners.push(Default::default()),
            ListField::StallsPrices => draft.requirements.stalls_prices.push(Default::default()),
            ListField::Artists => draft.artists.push(Default::default()),
            ListField::ChefGuests => draft.chef_guests.push(Default::default()),
            ListField::Attractions => draft.attractions.push(Default::default()),
        }
    }

    fn remove(self, draft: &mut EventDraft, index: usize) {
        match self {
            ListField::AudienceCategory => {
                draft.audience_category.remove(index);
            }
            ListField::TitleSponsors => {
                draft.sponsors.title_sponsors.remove(index);
            }
            ListField::CoPartners => {
                draft.sponsors.co_partners.remove(index);
            }
            ListField::MediaPartners => {
                draft.sponsors.media_partners.remove(index);
            }
            ListField::StallsPrices => {
                draft.requirements.stalls_prices.remove(index);
            }
            ListField::Artists => {
                draft.artists.remove(index);
            }
            ListField::ChefGuests => {
                draft.chef_guests.remove(index);
            }
            ListField::Attractions => {
                draft.attractions.remove(index);
            }
        }
    }

    fn entry(self, draft: &EventDraft, index: usize, key: EntryKey) -> Result<&str, Error> {
        let entry: &dyn ListEntry = match self {
            ListField::AudienceCategory => entry_at(&draft.audience_category, self, index)?,
            ListField::TitleSponsors => entry_at(&draft.sponsors.title_sponsors, self, index)?,
            ListField::CoPartners => entry_at(&draft.sponsors.co_partners, self, index)?,
            ListField::MediaPartners => entry_at(&draft.sponsors.media_partners, self, index)?,
            ListField::StallsPrices => entry_at(&draft.requirements.stalls_prices, self, index)?,
            ListField::Artists => entry_at(&draft.artists, self, index)?,
            ListField::ChefGuests => entry_at(&draft.chef_guests, self, index)?,
            ListField::Attractions => entry_at(&draft.attractions, self, index)?,
        };
        entry
            .field(key)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownField(format!("{self}.{index}.{key}")))
    }

    fn entry_mut(
        self,
        draft: &mut EventDraft,
        index: usize,
        key: EntryKey,
    ) -> Result<&mut String, Error> {
        let entry: &mut dyn ListEntry = match self {
            ListField::AudienceCategory => entry_at_mut(&mut draft.audience_category, self, index)?,
            ListField::TitleSponsors => {
                entry_at_mut(&mut draft.sponsors.title_sponsors, self, index)?
            }
            ListField::CoPartners => entry_at_mut(&mut draft.sponsors.co_partners, self, index)?,
            ListField::MediaPartners => {
                entry_at_mut(&mut draft.sponsors.media_partners, self, index)?
            }
            ListField::StallsPrices => {
                entry_at_mut(&mut draft.requirements.stalls_prices, self, index)?
            }
            ListField::Artists => entry_at_mut(&mut draft.artists, self, index)?,
            ListField::ChefGuests => entry_at_mut(&mut draft.chef_guests, self, index)?,
            ListField::Attractions => entry_at_mut(&mut draft.attractions, self, index)?,
        };
        entry
            .field_mut(key)
            .ok_or_else(|| Error::UnknownField(format!("{self}.{index}.{key}")))
    }
}

impl Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for ListField {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        ListField::ALL
            .into_iter()
            .find(|list| list.path() == path)
            .ok_or_else(|| Error::UnknownField(path.to_string()))
    }
}

/// Name of a text field inside a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Category,
    Price,
    Description,
    Name,
    Website,
    StallType,
    StallPrice,
    Genre,
    Specialty,
}

impl AsRef<str> for EntryKey {
    fn as_ref(&self) -> &str {
        match self {
            EntryKey::Category => "category",
            EntryKey::Price => "price",
            EntryKey::Description => "description",
            EntryKey::Name => "name",
            EntryKey::Website => "website",
            EntryKey::StallType => "stallType",
            EntryKey::StallPrice => "stallPrice",
            EntryKey::Genre => "genre",
            EntryKey::Specialty => "specialty",
        }
    }
}

impl Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EntryKey {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        use EntryKey::*;
        [
            Category,
            Price,
            Description,
            Name,
            Website,
            StallType,
            StallPrice,
            Genre,
            Specialty,
        ]
        .into_iter()
        .find(|key| key.as_ref() == value)
        .ok_or(())
    }
}

trait ListEntry {
    fn field(&self, key: EntryKey) -> Option<&String>;
    fn field_mut(&mut self, key: EntryKey) -> Option<&mut String>;
}

macro_rules! list_entry {
    ($ty: ty, { $($key: ident => $field: ident),+ $(,)? }) => {
        impl ListEntry for $ty {
            fn field(&self, key: EntryKey) -> Option<&String> {
                match key {
                    $(EntryKey::$key => Some(&self.$field),)+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }

            fn field_mut(&mut self, key: EntryKey) -> Option<&mut String> {
                match key {
                    $(EntryKey::$key => Some(&mut self.$field),)+
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    };
}

list_entry!(AudienceCategory, { Category => category, Price => price, Description => description });
list_entry!(Sponsor, { Name => name, Website => website });
list_entry!(StallPrice, { StallType => stall_type, StallPrice => stall_price });
list_entry!(ArtistSlot, { Name => name, Genre => genre });
list_entry!(ChefGuest, { Name => name, Specialty => specialty });
list_entry!(Attraction, { Name => name, Description => description });

fn entry_at<T>(items: &[T], list: ListField, index: usize) -> Result<&T, Error> {
    items.get(index).ok_or(Error::IndexOutOfRange {
        field: list.to_string(),
        index,
        len: items.len(),
    })
}

fn entry_at_mut<T>(items: &mut [T], list: ListField, index: usize) -> Result<&mut T, Error> {
    let len = items.len();
    items.get_mut(index).ok_or(Error::IndexOutOfRange {
        field: list.to_string(),
        index,
        len,
    })
}

/// Forces a mobile number into `+91 ` followed by at most ten digits.
pub fn normalize_mobile(input: &str) -> Result<String, Error> {
    let digits: String = match input.strip_prefix(MOBILE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => {
            let rest = match input.strip_prefix("+91") {
                Some(rest) => rest.strip_prefix(char::is_whitespace).unwrap_or(rest),
                None => input,
            };
            rest.chars().filter(char::is_ascii_digit).collect()
        }
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::invalid(
            TextField::ContactMobile,
            "only digits are allowed",
        ));
    }
    if digits.len() > MOBILE_MAX_DIGITS {
        return Err(Error::invalid(
            TextField::ContactMobile,
            format!("at most {MOBILE_MAX_DIGITS} digits are allowed"),
        ));
    }
    Ok(format!("{MOBILE_PREFIX}{digits}"))
}

fn parse_bool(path: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::invalid(path, "expected a boolean")),
    }
}

fn parse_range(path: &str, value: &str) -> Result<AudienceRange, Error> {
    let invalid = || Error::invalid(path, "expected `MIN-MAX`");
    let (min, max) = value.split_once('-').ok_or_else(invalid)?;
    Ok(AudienceRange {
        min: min.trim().parse().map_err(|_| invalid())?,
        max: max.trim().parse().map_err(|_| invalid())?,
    })
}
