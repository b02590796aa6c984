// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use baatasari_core::{
    AddOn, DiscountType, EntryKey, FieldUpdate, ListField, Step, TARGET_AUDIENCE_TAGS, TextField,
    TicketType, Transport,
};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{
    Access, CheckboxGroup, Form, FormItem, FormItemState, Input, RadioGroup, active_state,
};
use crate::tui::component_form_util::{OnEnter, ParsedAccess, Toggle, VisibleIf, VisiblePredicate};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::wizard_store::{Notice, WizardStore};

type Item = Box<dyn FormItem<WizardStore>>;

pub type WizardPage = SinglePage<WizardStore, WizardBody>;

/// Builds the page for the store's current step, focusing the item at `item_index`.
pub fn new_wizard_page(store: &RefCell<WizardStore>, item_index: usize) -> WizardPage {
    let step = store.borrow().step;
    let items = StepItems::for_step(step, &store.borrow());
    let form = Form::new(items).with_item_index(item_index);
    SinglePage::new(format!("Create Event · {step}"), WizardBody { form }).with_instructions(
        Line::from(vec![
            " Field ".into(),
            "<Up/Down>".blue().bold(),
            " Back ".into(),
            "<PgUp>".blue().bold(),
            " Continue ".into(),
            "<Enter/PgDn>".blue().bold(),
            " Exit ".into(),
            "<Esc> ".blue().bold(),
        ]),
    )
}

/// Stepper on top, the step form, and a notice line at the bottom.
pub struct WizardBody {
    form: Form<WizardStore, Item>,
}

impl WizardBody {
    pub fn item_index(&self) -> usize {
        self.form.item_index()
    }

    fn layout(area: Rect) -> [Rect; 3] {
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area)
    }
}

impl Component<WizardStore> for WizardBody {
    fn render(&self, store: &RefCell<WizardStore>, area: Rect, buf: &mut Buffer) {
        let [stepper, form, notice] = Self::layout(area);
        render_stepper(store.borrow().step, stepper, buf);
        self.form.render(store, form, buf);
        render_notice(&store.borrow(), notice, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<WizardStore>, area: Rect) -> Option<(u16, u16)> {
        let [_, form, _] = Self::layout(area);
        self.form.get_cursor_position(store, form)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<WizardStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let [_, form, _] = Self::layout(area);
        self.form.on_key(dispatcher, store, form, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

fn render_stepper(current: Step, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![" ".into()];
    for (i, step) in Step::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(" ─ ".dark_gray());
        }
        let label = format!("{} {}", step.number(), step.title());
        spans.push(match step.cmp(&current) {
            std::cmp::Ordering::Less => format!("✓ {label}").green(),
            std::cmp::Ordering::Equal => format!("● {label}").bold(),
            std::cmp::Ordering::Greater => format!("○ {label}").dark_gray(),
        });
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_notice(store: &WizardStore, area: Rect, buf: &mut Buffer) {
    let line = match &store.notice {
        Some(Notice::Error(msg)) => Line::from(format!(" {msg}").red()),
        Some(Notice::Info(msg)) => Line::from(format!(" {msg}").green()),
        None => match (&store.draft.event_photo, store.step) {
            (Some(photo), Step::EventInfo) => Line::from(
                format!(" Photo: {} ({}, {} bytes)", photo.name, photo.mime_type, photo.size)
                    .dim(),
            ),
            _ => Line::default(),
        },
    };
    Paragraph::new(line).render(area, buf);
}

/// Collects the items of one step, section by section.
struct StepItems {
    items: Vec<Item>,
    section: &'static str,
}

impl StepItems {
    fn for_step(step: Step, store: &WizardStore) -> Vec<Item> {
        let mut b = StepItems {
            items: Vec::new(),
            section: "",
        };
        match step {
            Step::EventInfo => b.event_info(store),
            Step::Ticketing => b.ticketing(store),
            Step::Sponsorship => b.sponsorship(store),
            Step::Final => b.final_details(store),
        }
        b.items
    }

    fn event_info(&mut self, store: &WizardStore) {
        use TextField::*;
        self.section("event-info", "Event Information");
        self.text("Event Name", EventName);
        self.text("Category", Category);
        self.text("Tagline", Tagline);
        self.text("Description", Description);
        self.text("Key Personnel", Personnel);
        self.text("Venue", Venue);
        self.text("Google Maps URL", GoogleMapsUrl);
        self.text("How to Reach", TransportToEvent);
        self.text("Entry Side", EntrySide);
        let transport = Transport::ALL
            .into_iter()
            .map(|a| (a.label().to_string(), Switch::Transport(a)))
            .collect();
        self.push(CheckboxGroup::new("Transport Options", transport), None);

        self.section("date-time", "Date & Time");
        self.text("Start Date", Date);
        self.text("End Date", EndDate);
        self.text("Start Time (H:MM AM/PM)", Time);
        self.text("End Time (H:MM AM/PM)", EndTime);

        self.section("event-highlights", "Event Highlights");
        self.list(store, ListField::Artists, None);
        self.list(store, ListField::ChefGuests, None);
        self.list(store, ListField::Attractions, None);

        self.section("photo-media", "Photo & Media");
        let photo = OnEnter::new(
            Input::new("Event Photo (path, <Enter> to attach)", PhotoPath),
            Action::AttachPhoto,
        );
        self.push(photo, None);
        self.text("Media Links", Media);
    }

    fn ticketing(&mut self, store: &WizardStore) {
        use TextField::*;
        self.section("ticketing", "Ticketing");
        let ticket_type = RadioGroup::new(
            "Ticket Type",
            vec![Some(TicketType::Paid), Some(TicketType::Free)],
            vec!["Paid".to_string(), "Free".to_string()],
            TicketTypeAccess,
        );
        self.push(ticket_type, None);
        self.text("Ticket Name", TicketName);
        self.text("Ticket Quantity", TicketQuantity);
        self.list(store, ListField::AudienceCategory, Some(Condition::PaidTickets));
        self.push(Input::new("Refund Policy", Text(RefundPolicy)), Some(Condition::PaidTickets));

        self.section("audience", "Target Audience");
        let tags = TARGET_AUDIENCE_TAGS
            .into_iter()
            .map(|a| (a.to_string(), Switch::Audience(a)))
            .collect();
        self.push(CheckboxGroup::new("Audience", tags), None);
        let min = ParsedAccess::<u32, _>::new(AudienceBound::Min);
        self.push(Input::new("Minimum Age", min), None);
        let max = ParsedAccess::<u32, _>::new(AudienceBound::Max);
        self.push(Input::new("Maximum Age", max), None);

        self.section("guidelines", "Guidelines");
        self.text("Guidelines", Guidelines);

        self.section("addOns", "Add-ons");
        let add_ons = AddOn::ALL
            .into_iter()
            .map(|a| (a.label().to_string(), Switch::AddOn(a)))
            .collect();
        self.push(CheckboxGroup::new("Add-ons", add_ons), None);
        let hampers = Input::new("Gift Hampers Description", Text(GiftHampersDescription));
        self.push(hampers, Some(Condition::GiftHampers));
        let other = Input::new("Other Add-on Description", Text(AddOtherDescription));
        self.push(other, Some(Condition::AddOther));

        self.section("discounts", "Discounts & Offers");
        let offers = vec![("Enable offers".to_string(), Switch::EnableOffers)];
        self.push(CheckboxGroup::new("Offers", offers), None);
        let discount_type = RadioGroup::new(
            "Discount Type",
            vec![None, Some(DiscountType::Flat), Some(DiscountType::Percentage)],
            vec![
                "Unset".to_string(),
                "Flat".to_string(),
                "Percentage".to_string(),
            ],
            DiscountTypeAccess,
        );
        self.push(discount_type, Some(Condition::OffersEnabled));
        let amount = Input::new("Discount Amount", Text(DiscountAmount));
        self.push(amount, Some(Condition::OffersEnabled));
        let code = Input::new("Discount Code", Text(DiscountCode));
        self.push(code, Some(Condition::OffersEnabled));
    }

    fn sponsorship(&mut self, store: &WizardStore) {
        use TextField::*;
        self.section("sponsorship", "Sponsorship");
        self.list(store, ListField::TitleSponsors, None);
        self.list(store, ListField::CoPartners, None);
        self.list(store, ListField::MediaPartners, None);

        self.section("contactInfo", "Contact Information");
        self.text("Mobile (+91)", ContactMobile);
        self.text("Email", ContactEmail);
        self.text("Website", ContactWebsite);
        self.text("Additional Links", ContactAdditionalLinks);
    }

    fn final_details(&mut self, store: &WizardStore) {
        use TextField::*;
        self.section("requirements", "Requirements");
        self.text("Artists Required", RequirementsArtists);
        self.text("Stalls Availability", StallsAvailability);
        self.list(store, ListField::StallsPrices, None);

        self.section("postEvent", "Post-Event Follow-up");
        self.text("Thank-You Note", ThankYouNote);
    }

    fn section(&mut self, name: &'static str, title: &str) {
        self.section = name;
        self.items.push(Box::new(Toggle::new(title, SectionAccess(name))));
    }

    fn text(&mut self, title: &str, field: TextField) {
        self.push(Input::new(title, Text(field)), None);
    }

    /// One input per entry key, then the add/remove controls.
    fn list(&mut self, store: &WizardStore, list: ListField, extra: Option<Condition>) {
        let noun = list_noun(list);
        for index in 0..list.len(&store.draft) {
            for key in list.keys() {
                let title = format!("{noun} {} · {}", index + 1, key_label(*key));
                let field = TextField::Entry(list, index, *key);
                self.push(Input::new(title, Text(field)), extra);
            }
        }
        self.push(ListControls::new(list), extra);
    }

    fn push(&mut self, item: impl FormItem<WizardStore> + 'static, extra: Option<Condition>) {
        let when = When {
            section: self.section,
            extra,
        };
        self.items.push(Box::new(VisibleIf::new(item, when)));
    }
}

fn list_noun(list: ListField) -> &'static str {
    match list {
        ListField::AudienceCategory => "Audience Category",
        ListField::TitleSponsors => "Title Sponsor",
        ListField::CoPartners => "Co-Partner",
        ListField::MediaPartners => "Media Partner",
        ListField::StallsPrices => "Stall",
        ListField::Artists => "Artist",
        ListField::ChefGuests => "Chef Guest",
        ListField::Attractions => "Attraction",
    }
}

fn key_label(key: EntryKey) -> &'static str {
    match key {
        EntryKey::Category => "Category",
        EntryKey::Price => "Price",
        EntryKey::Description => "Description",
        EntryKey::Name => "Name",
        EntryKey::Website => "Website",
        EntryKey::StallType => "Type",
        EntryKey::StallPrice => "Price",
        EntryKey::Genre => "Genre",
        EntryKey::Specialty => "Specialty",
    }
}

#[derive(Debug, Clone, Copy)]
enum Condition {
    PaidTickets,
    GiftHampers,
    AddOther,
    OffersEnabled,
}

/// Visible while the section is open and the extra condition, if any, holds.
struct When {
    section: &'static str,
    extra: Option<Condition>,
}

impl VisiblePredicate<WizardStore> for When {
    fn is_visible(&self, store: &RefCell<WizardStore>) -> bool {
        let store = store.borrow();
        if !store.sections.is_open(self.section) {
            return false;
        }

        let draft = &store.draft;
        match self.extra {
            None => true,
            Some(Condition::PaidTickets) => draft.ticket_type == Some(TicketType::Paid),
            Some(Condition::GiftHampers) => draft.add_ons.gift_hampers,
            Some(Condition::AddOther) => draft.add_ons.add_other,
            Some(Condition::OffersEnabled) => draft.enable_offers,
        }
    }
}

struct SectionAccess(&'static str);

impl Access<WizardStore, bool> for SectionAccess {
    fn get(&self, store: &RefCell<WizardStore>) -> bool {
        store.borrow().sections.is_open(self.0)
    }

    fn set(&self, dispatcher: &mut Dispatcher, _value: bool) -> bool {
        dispatcher.dispatch(Action::ToggleSection(self.0));
        true
    }
}

struct Text(TextField);

impl Access<WizardStore, String> for Text {
    fn get(&self, store: &RefCell<WizardStore>) -> String {
        self.0
            .get(&store.borrow().draft)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::Update(FieldUpdate::Text(self.0, value)));
        true
    }

    fn error(&self, store: &RefCell<WizardStore>) -> Option<String> {
        store.borrow().errors.for_field(self.0).map(ToString::to_string)
    }
}

struct TicketTypeAccess;

impl Access<WizardStore, Option<TicketType>> for TicketTypeAccess {
    fn get(&self, store: &RefCell<WizardStore>) -> Option<TicketType> {
        store.borrow().draft.ticket_type
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: Option<TicketType>) -> bool {
        match value {
            Some(v) => {
                dispatcher.dispatch(Action::Update(FieldUpdate::TicketType(v)));
                true
            }
            None => false,
        }
    }

    fn error(&self, store: &RefCell<WizardStore>) -> Option<String> {
        store.borrow().errors.get("ticketType").map(ToString::to_string)
    }
}

struct DiscountTypeAccess;

impl Access<WizardStore, Option<DiscountType>> for DiscountTypeAccess {
    fn get(&self, store: &RefCell<WizardStore>) -> Option<DiscountType> {
        store.borrow().draft.discount_type
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: Option<DiscountType>) -> bool {
        dispatcher.dispatch(Action::Update(FieldUpdate::DiscountType(value)));
        true
    }

    fn error(&self, store: &RefCell<WizardStore>) -> Option<String> {
        store.borrow().errors.get("discountType").map(ToString::to_string)
    }
}

/// A boolean leaf of the draft shown as a checkbox.
enum Switch {
    Transport(Transport),
    AddOn(AddOn),
    Audience(&'static str),
    EnableOffers,
}

impl Access<WizardStore, bool> for Switch {
    fn get(&self, store: &RefCell<WizardStore>) -> bool {
        let draft = &store.borrow().draft;
        match self {
            Switch::Transport(a) => draft.transport_options.get(*a),
            Switch::AddOn(a) => draft.add_ons.get(*a),
            Switch::Audience(tag) => draft.target_audience.get(*tag).copied().unwrap_or(false),
            Switch::EnableOffers => draft.enable_offers,
        }
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: bool) -> bool {
        let update = match self {
            Switch::Transport(a) => FieldUpdate::Transport(*a, value),
            Switch::AddOn(a) => FieldUpdate::AddOn(*a, value),
            Switch::Audience(tag) => FieldUpdate::TargetAudience(tag.to_string(), value),
            Switch::EnableOffers => FieldUpdate::EnableOffers(value),
        };
        dispatcher.dispatch(Action::Update(update));
        true
    }
}

enum AudienceBound {
    Min,
    Max,
}

impl Access<WizardStore, u32> for AudienceBound {
    fn get(&self, store: &RefCell<WizardStore>) -> u32 {
        let range = store.borrow().draft.audience_range;
        match self {
            AudienceBound::Min => range.min,
            AudienceBound::Max => range.max,
        }
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: u32) -> bool {
        dispatcher.dispatch(match self {
            AudienceBound::Min => Action::UpdateAudienceMin(value),
            AudienceBound::Max => Action::UpdateAudienceMax(value),
        });
        true
    }
}

struct PhotoPath;

impl Access<WizardStore, String> for PhotoPath {
    fn get(&self, store: &RefCell<WizardStore>) -> String {
        store.borrow().photo_path.clone()
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: String) -> bool {
        dispatcher.dispatch(Action::UpdatePhotoPath(value));
        true
    }
}

/// "Add" and "Remove last" buttons under a list of entries.
struct ListControls {
    list: ListField,
    title: String,
    cursor: usize,
    active: bool,
}

const LIST_BUTTONS: [&str; 2] = ["[+ Add]", "[- Remove last]"];

impl ListControls {
    fn new(list: ListField) -> Self {
        Self {
            list,
            title: format!("{} entries", list_noun(list)),
            cursor: 0,
            active: false,
        }
    }

    fn press(&self, dispatcher: &mut Dispatcher, store: &RefCell<WizardStore>) {
        let update = match self.cursor {
            0 => FieldUpdate::Push(self.list),
            _ => match self.list.len(&store.borrow().draft) {
                0 => return,
                len => FieldUpdate::Remove(self.list, len - 1),
            },
        };
        dispatcher.dispatch(Action::Update(update));
    }
}

impl Component<WizardStore> for ListControls {
    fn render(&self, store: &RefCell<WizardStore>, area: Rect, buf: &mut Buffer) {
        let len = self.list.len(&store.borrow().draft);
        let mut spans = Vec::new();
        for (i, label) in LIST_BUTTONS.into_iter().enumerate() {
            let span = match self.active && i == self.cursor {
                true => label.reversed(),
                false => Span::raw(label),
            };
            spans.push(span);
            spans.push("  ".into());
        }
        spans.push(format!("{len} total").dim());
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<WizardStore>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let offset: usize = LIST_BUTTONS[..self.cursor].iter().map(|a| a.len() + 2).sum();
        Some((area.x + offset as u16 + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<WizardStore>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        match event.code {
            KeyCode::Left | KeyCode::Right => self.cursor = 1 - self.cursor,
            KeyCode::Enter | KeyCode::Char(' ') => self.press(dispatcher, store),
            _ => return None,
        }
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<WizardStore>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<WizardStore>) {
        self.active = false;
    }
}

impl FormItem<WizardStore> for ListControls {
    fn item_title(&self, _store: &RefCell<WizardStore>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<WizardStore>) -> FormItemState {
        active_state(self.active)
    }
}
