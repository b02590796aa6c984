// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::EventDraft;
use crate::update::{EntryKey, ListField, TextField};

/// Validation messages keyed by dotted field path.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Message for a text field, if it failed validation.
    pub fn for_field(&self, field: TextField) -> Option<&str> {
        self.get(&field.to_string())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn insert(&mut self, path: impl ToString, message: &str) {
        self.0.insert(path.to_string(), message.to_string());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, message) in self.iter() {
            writeln!(f, "{path}: {message}")?;
        }
        Ok(())
    }
}

/// Required text fields and their messages, in form order.
const REQUIRED: [(TextField, &str, Blank); 17] = [
    (TextField::EventName, "Event Name is required", Blank::Trimmed),
    (TextField::Category, "Category is required", Blank::Trimmed),
    (TextField::Tagline, "Tagline is required", Blank::Trimmed),
    (TextField::Description, "Description is required", Blank::Trimmed),
    (TextField::Personnel, "Personnel is required", Blank::Trimmed),
    (TextField::Date, "Date is required", Blank::Empty),
    (TextField::Time, "Start time is required", Blank::Empty),
    (TextField::EndTime, "End time is required", Blank::Empty),
    (TextField::Venue, "Venue is required", Blank::Trimmed),
    (TextField::EntrySide, "Entry Side is required", Blank::Trimmed),
    (TextField::TicketName, "Ticket name is required", Blank::Trimmed),
    (TextField::Guidelines, "Guidelines are required", Blank::Trimmed),
    (TextField::ContactMobile, "Mobile number is required", Blank::Trimmed),
    (TextField::ContactEmail, "Email is required", Blank::Trimmed),
    (TextField::RequirementsArtists, "Artists/Singers field is required", Blank::Trimmed),
    (
        TextField::StallsAvailability,
        "Stalls availability is required",
        Blank::Trimmed,
    ),
    (TextField::ThankYouNote, "Thank you note is required", Blank::Trimmed),
];

#[derive(Debug, Clone, Copy)]
enum Blank {
    /// Only the empty string is missing.
    Empty,
    /// Whitespace-only strings are missing too.
    Trimmed,
}

impl Blank {
    fn is_missing(self, value: &str) -> bool {
        match self {
            Blank::Empty => value.is_empty(),
            Blank::Trimmed => value.trim().is_empty(),
        }
    }
}

/// Checks a draft against the fixed rule table.
///
/// Returns an empty map when the draft can be submitted.
pub fn validate(draft: &EventDraft) -> FormErrors {
    let mut errors = FormErrors::new();

    for (field, message, blank) in REQUIRED {
        // simple fields never fail to resolve
        if let Ok(value) = field.get(draft)
            && blank.is_missing(value)
        {
            errors.insert(field, message);
        }
    }

    if draft.ticket_type.is_none() {
        errors.insert("ticketType", "Ticket type is required");
    }

    if draft.is_paid() {
        if draft.audience_category.is_empty() {
            let field = TextField::Entry(ListField::AudienceCategory, 0, EntryKey::Category);
            errors.insert(field, "At least one audience category is required");
        }
        for (i, entry) in draft.audience_category.iter().enumerate() {
            let field = |key| TextField::Entry(ListField::AudienceCategory, i, key);
            if entry.category.trim().is_empty() {
                errors.insert(field(EntryKey::Category), "Category is required");
            }
            if entry.price.is_empty() {
                errors.insert(field(EntryKey::Price), "Price is required");
            }
            if entry.description.trim().is_empty() {
                errors.insert(field(EntryKey::Description), "Description is required");
            }
        }
        if draft.refund_policy.trim().is_empty() {
            errors.insert(TextField::RefundPolicy, "Refund policy is required");
        }
    }

    match js_number(&draft.ticket_quantity) {
        Some(n) if !draft.ticket_quantity.is_empty() && n >= 1.0 => {}
        _ => errors.insert(TextField::TicketQuantity, "Ticket quantity is required"),
    }

    if draft.enable_offers {
        if draft.discount_type.is_none() {
            errors.insert("discountType", "Discount type is required");
        }
        if draft.discount_amount.is_empty() || js_number(&draft.discount_amount).is_none() {
            errors.insert(TextField::DiscountAmount, "Discount amount is required");
        }
        if draft.discount_code.trim().is_empty() {
            errors.insert(TextField::DiscountCode, "Discount code is required");
        }
    }

    if draft.add_ons.gift_hampers && draft.add_ons.gift_hampers_description.trim().is_empty() {
        errors.insert(
            TextField::GiftHampersDescription,
            "Gift hampers description is required",
        );
    }

    for (i, stall) in draft.requirements.stalls_prices.iter().enumerate() {
        let field = |key| TextField::Entry(ListField::StallsPrices, i, key);
        if stall.stall_type.trim().is_empty() {
            errors.insert(field(EntryKey::StallType), "Stall type is required");
        }
        if stall.stall_price.is_empty() || js_number(&stall.stall_price).is_none() {
            errors.insert(field(EntryKey::StallPrice), "Stall price is required");
        }
    }

    tracing::debug!(count = errors.len(), "validated event draft");
    errors
}

/// Converts text to a number the way a browser form does, `None` standing for NaN.
///
/// Surrounding whitespace is ignored and a blank string counts as zero.
pub fn js_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|a| a as f64);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-');
    if !s.chars().all(allowed) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AudienceCategory, DiscountType, StallPrice, TicketType};
    use crate::tests_utils::complete_draft;

    fn keys(errors: &FormErrors) -> Vec<&str> {
        errors.keys().collect()
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate(&complete_draft()).is_empty());
    }

    #[test]
    fn default_draft_reports_every_required_field() {
        let errors = validate(&EventDraft::default());
        assert_eq!(errors.get("eventName"), Some("Event Name is required"));
        assert_eq!(errors.get("time"), Some("Start time is required"));
        assert_eq!(
            errors.get("audienceCategory.0.price"),
            Some("Price is required")
        );
        assert_eq!(
            errors.get("requirements.stallsPrices.1.stallType"),
            Some("Stall type is required")
        );
        assert_eq!(errors.get("ticketQuantity"), Some("Ticket quantity is required"));
        assert!(errors.get("discountType").is_none());
        assert!(errors.get("sponsors.titleSponsors.0.name").is_none());
    }

    #[test]
    fn each_missing_required_field_is_reported_alone() {
        for (field, message, _) in REQUIRED {
            let mut draft = complete_draft();
            match field {
                // updates always keep the mobile prefix
                TextField::ContactMobile => draft.contact_info.mobile.clear(),
                _ => draft
                    .update(crate::FieldUpdate::Text(field, String::new()))
                    .unwrap(),
            }

            let errors = validate(&draft);
            assert_eq!(keys(&errors), vec![field.to_string().as_str()], "{field}");
            assert_eq!(errors.for_field(field), Some(message));
        }
    }

    #[test]
    fn whitespace_only_values_are_missing() {
        let mut draft = complete_draft();
        draft.tagline = "   ".to_string();
        draft.date = " ".to_string(); // date only needs to be non-empty
        let errors = validate(&draft);
        assert_eq!(keys(&errors), vec!["tagline"]);
    }

    #[test]
    fn free_tickets_skip_audience_and_refund_rules() {
        let mut draft = complete_draft();
        draft.ticket_type = Some(TicketType::Free);
        draft.audience_category = vec![AudienceCategory::default()];
        draft.refund_policy.clear();
        assert!(validate(&draft).is_empty());

        draft.ticket_name.clear();
        assert_eq!(keys(&validate(&draft)), vec!["ticketName"]);
    }

    #[test]
    fn unset_ticket_type_is_reported() {
        let mut draft = complete_draft();
        draft.ticket_type = None;
        assert_eq!(keys(&validate(&draft)), vec!["ticketType"]);
    }

    #[test]
    fn paid_without_categories_reports_first_slot() {
        let mut draft = complete_draft();
        draft.audience_category.clear();
        let errors = validate(&draft);
        assert_eq!(
            errors.get("audienceCategory.0.category"),
            Some("At least one audience category is required")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn ticket_quantity_must_be_at_least_one() {
        let mut draft = complete_draft();
        for bad in ["", "0", "abc", "0.5", "-3"] {
            draft.ticket_quantity = bad.to_string();
            assert_eq!(keys(&validate(&draft)), vec!["ticketQuantity"], "{bad:?}");
        }
        for good in ["1", " 12 ", "1e2"] {
            draft.ticket_quantity = good.to_string();
            assert!(validate(&draft).is_empty(), "{good:?}");
        }
    }

    #[test]
    fn offers_require_discount_details() {
        let mut draft = complete_draft();
        draft.enable_offers = true;
        let errors = validate(&draft);
        assert_eq!(
            keys(&errors),
            vec!["discountAmount", "discountCode", "discountType"]
        );

        draft.discount_type = Some(DiscountType::Percentage);
        draft.discount_amount = "ten".to_string();
        draft.discount_code = "EARLY10".to_string();
        assert_eq!(keys(&validate(&draft)), vec!["discountAmount"]);

        draft.discount_amount = "10".to_string();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn gift_hampers_need_a_description() {
        let mut draft = complete_draft();
        draft.add_ons.gift_hampers = true;
        assert_eq!(
            keys(&validate(&draft)),
            vec!["addOns.giftHampersDescription"]
        );
    }

    #[test]
    fn stall_prices_must_be_numeric() {
        let mut draft = complete_draft();
        draft.requirements.stalls_prices.push(StallPrice {
            stall_type: "Crafts".to_string(),
            stall_price: "cheap".to_string(),
        });
        assert_eq!(
            keys(&validate(&draft)),
            vec!["requirements.stallsPrices.1.stallPrice"]
        );
    }

    #[test]
    fn js_number_follows_browser_rules() {
        assert_eq!(js_number(""), Some(0.0));
        assert_eq!(js_number("  "), Some(0.0));
        assert_eq!(js_number(" 42 "), Some(42.0));
        assert_eq!(js_number("0x10"), Some(16.0));
        assert_eq!(js_number("1e3"), Some(1000.0));
        assert_eq!(js_number(".5"), Some(0.5));
        assert_eq!(js_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(js_number("12abc"), None);
        assert_eq!(js_number("NaN"), None);
        assert_eq!(js_number("inf"), None);
        assert_eq!(js_number("1_000"), None);
    }
}
