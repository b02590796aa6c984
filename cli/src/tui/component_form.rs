// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_index_of_grapheme, byte_range_of_grapheme_at, grapheme_count, width_of_graphemes,
};

pub struct Form<S, C: FormItem<S>> {
    items: Vec<C>,
    item_index: usize,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, C: FormItem<S>> Form<S, C> {
    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            item_index: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Starts focused on the item at `index`, clamped to the item count.
    pub fn with_item_index(mut self, index: usize) -> Self {
        self.item_index = index.min(self.items.len().saturating_sub(1));
        self
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Visible items placed top-down, scrolled so the focused item fits.
    fn placements(&self, store: &RefCell<S>, area: Rect) -> Vec<(usize, Rect)> {
        let area = area.inner(Margin::new(1, 1));
        let heights: Vec<(usize, u16)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item_is_visible(*item, store))
            .map(|(i, item)| (i, item_height(item, store)))
            .collect();

        let focused = heights
            .iter()
            .position(|(i, _)| *i >= self.item_index)
            .unwrap_or(0);

        let mut start = focused;
        let mut used = heights.get(focused).map_or(0, |(_, h)| *h);
        while start > 0 && used + heights[start - 1].1 <= area.height {
            start -= 1;
            used += heights[start].1;
        }

        let mut y = area.y;
        let mut placed = Vec::new();
        for (i, h) in heights.into_iter().skip(start) {
            if y + h > area.bottom() {
                break;
            }
            placed.push((i, Rect::new(area.x, y, area.width, h)));
            y += h;
        }
        placed
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, forward: bool) -> bool {
        let target = match forward {
            true => (self.item_index + 1..self.items.len())
                .find(|i| item_is_visible(&self.items[*i], store)),
            false => (0..self.item_index)
                .rev()
                .find(|i| item_is_visible(&self.items[*i], store)),
        };

        let Some(target) = target else {
            return false;
        };

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }
        self.item_index = target;
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
        true
    }
}

impl<S, C: FormItem<S>> Component<S> for Form<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let placements = self.placements(store, area);
        let last = placements.len().saturating_sub(1);
        for (n, (i, area)) in placements.into_iter().enumerate() {
            let item = &self.items[i];
            item_render(n == last, item, store, area, buf);
            item.render(store, item_inner(area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.placements(store, area)
            .into_iter()
            .find(|(i, _)| *i == self.item_index)
            .and_then(|(i, area)| self.items[i].get_cursor_position(store, item_inner(area)))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let subarea = self
            .placements(store, area)
            .into_iter()
            .find(|(i, _)| *i == self.item_index)
            .map(|(_, area)| item_inner(area));

        if let Some(subarea) = subarea
            && let Some(item) = self.items.get_mut(self.item_index)
            && let Some(msg) = item.on_key(dispatcher, store, subarea, event)
        {
            return Some(msg);
        }

        match event.code {
            KeyCode::Up | KeyCode::BackTab => self
                .navigate(dispatcher, store, false)
                .then_some(Message::CursorUpdated),
            KeyCode::Down | KeyCode::Tab => self
                .navigate(dispatcher, store, true)
                .then_some(Message::CursorUpdated),
            KeyCode::Enter | KeyCode::PageDown => {
                dispatcher.dispatch(Action::NextStep);
                Some(Message::Handled)
            }
            KeyCode::PageUp => {
                dispatcher.dispatch(Action::PreviousStep);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self, store: &RefCell<S>) -> &str;
    fn item_state(&self, store: &RefCell<S>) -> FormItemState;

    /// Validation message shown under the item.
    fn item_error(&self, _store: &RefCell<S>) -> Option<String> {
        None
    }
}

impl<S> Component<S> for Box<dyn FormItem<S>> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        (**self).render(store, area, buf)
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        (**self).get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        (**self).on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).activate(dispatcher, store)
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).deactivate(dispatcher, store)
    }
}

impl<S> FormItem<S> for Box<dyn FormItem<S>> {
    fn item_title(&self, store: &RefCell<S>) -> &str {
        (**self).item_title(store)
    }

    fn item_state(&self, store: &RefCell<S>) -> FormItemState {
        (**self).item_state(store)
    }

    fn item_error(&self, store: &RefCell<S>) -> Option<String> {
        (**self).item_error(store)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItemState {
    /// Focused.
    Active,

    Inactive,

    /// Hidden, skipped by navigation. By default, all items are visible.
    Invisible,
}

/// Reads a value from the store and writes it back through the dispatcher.
pub trait Access<S, T> {
    fn get(&self, store: &RefCell<S>) -> T;
    fn set(&self, dispatcher: &mut Dispatcher, value: T) -> bool;

    fn error(&self, _store: &RefCell<S>) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub struct Input<S, A: Access<S, String>> {
    title: String,
    access: A,
    active: bool,
    /// Cursor position, in graphemes.
    grapheme_index: usize,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString, access: A) -> Self {
        Self {
            title: title.to_string(),
            access,
            active: false,
            grapheme_index: 0,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = self.access.get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = self.access.get(store);
        let width = width_of_graphemes(&v, self.grapheme_index);
        Some((area.x + width as u16, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active || !matches!(event.code, Left | Right | Home | End | Backspace | Char(_)) {
            return None;
        }

        let mut v = self.access.get(store);
        let len = grapheme_count(&v);
        self.grapheme_index = self.grapheme_index.min(len);
        match event.code {
            Left if self.grapheme_index > 0 => self.grapheme_index -= 1,
            Right if self.grapheme_index < len => self.grapheme_index += 1,
            Home => self.grapheme_index = 0,
            End => self.grapheme_index = len,
            Backspace if self.grapheme_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.grapheme_index - 1) {
                    v.replace_range(range, "");
                    if self.access.set(dispatcher, v) {
                        self.grapheme_index -= 1;
                    }
                }
            }
            Char(c) => {
                v.insert(byte_index_of_grapheme(&v, self.grapheme_index), c);
                if self.access.set(dispatcher, v) {
                    self.grapheme_index += 1;
                }
            }
            _ => {}
        };

        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.grapheme_index = grapheme_count(&self.access.get(store));
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }

    fn item_error(&self, store: &RefCell<S>) -> Option<String> {
        self.access.error(store)
    }
}

/// Exactly one of several values, switched with the arrow keys.
#[derive(Debug)]
pub struct RadioGroup<S, T: PartialEq + Clone, A: Access<S, T>> {
    title: String,
    values: Vec<T>,
    options: Vec<String>,
    access: A,
    active: bool,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, T: PartialEq + Clone, A: Access<S, T>> RadioGroup<S, T, A> {
    pub fn new(title: impl ToString, values: Vec<T>, options: Vec<String>, access: A) -> Self {
        Self {
            title: title.to_string(),
            values,
            options,
            access,
            active: false,
            _phantom: std::marker::PhantomData,
        }
    }

    fn selected(&self, store: &RefCell<S>) -> Option<usize> {
        let v = self.access.get(store);
        self.values.iter().position(|s| s == &v)
    }
}

impl<S, T: PartialEq + Clone, A: Access<S, T>> Component<S> for RadioGroup<S, T, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let selected = self.selected(store);
        let labels = self.options.iter().enumerate().map(|(i, label)| {
            let icon = if selected == Some(i) { 'x' } else { ' ' };
            format!("({icon}) {label}")
        });
        render_options(labels, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let offsets = option_offsets(self.options.iter().map(|a| format!("( ) {a}")));
        offsets
            .get(self.selected(store).unwrap_or(0))
            .map(|x| (area.x + x + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.values.is_empty() {
            return None;
        }

        let len = self.values.len();
        let index = match (event.code, self.selected(store)) {
            (KeyCode::Left, Some(i)) => (i + len - 1) % len,
            (KeyCode::Right, Some(i)) => (i + 1) % len,
            (KeyCode::Left | KeyCode::Right, None) => 0,
            _ => return None,
        };
        match self.values.get(index) {
            Some(a) => {
                self.access.set(dispatcher, a.to_owned());
                Some(Message::CursorUpdated)
            }
            None => Some(Message::Handled),
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, T: PartialEq + Clone, A: Access<S, T>> FormItem<S> for RadioGroup<S, T, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }

    fn item_error(&self, store: &RefCell<S>) -> Option<String> {
        self.access.error(store)
    }
}

/// Independent on/off options on one line, toggled with space.
pub struct CheckboxGroup<S, A: Access<S, bool>> {
    title: String,
    options: Vec<(String, A)>,
    cursor: usize,
    active: bool,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, A: Access<S, bool>> CheckboxGroup<S, A> {
    pub fn new(title: impl ToString, options: Vec<(String, A)>) -> Self {
        Self {
            title: title.to_string(),
            options,
            cursor: 0,
            active: false,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, bool>> Component<S> for CheckboxGroup<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let labels = self.options.iter().map(|(label, access)| {
            let icon = if access.get(store) { 'x' } else { ' ' };
            format!("[{icon}] {label}")
        });
        render_options(labels, area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let offsets = option_offsets(self.options.iter().map(|(a, _)| format!("[ ] {a}")));
        offsets.get(self.cursor).map(|x| (area.x + x + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.options.is_empty() {
            return None;
        }

        let len = self.options.len();
        match event.code {
            KeyCode::Left => self.cursor = (self.cursor + len - 1) % len,
            KeyCode::Right => self.cursor = (self.cursor + 1) % len,
            KeyCode::Char(' ') => {
                if let Some((_, access)) = self.options.get(self.cursor) {
                    let value = access.get(store);
                    access.set(dispatcher, !value);
                }
            }
            _ => return None,
        }
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: Access<S, bool>> FormItem<S> for CheckboxGroup<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }
}

const OPTION_GAP: &str = "  ";

fn render_options(labels: impl Iterator<Item = String>, area: Rect, buf: &mut Buffer) {
    let line = labels.collect::<Vec<_>>().join(OPTION_GAP);
    Paragraph::new(line).render(area, buf);
}

fn option_offsets(labels: impl Iterator<Item = String>) -> Vec<u16> {
    let mut x = 0;
    labels
        .map(|label| {
            let offset = x;
            x += (label.width() + OPTION_GAP.len()) as u16;
            offset
        })
        .collect()
}

pub(crate) fn active_state(active: bool) -> FormItemState {
    match active {
        true => FormItemState::Active,
        false => FormItemState::Inactive,
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";
const S_STEP_ERROR: &str = "▲";

const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(
    is_last: bool,
    item: &impl FormItem<S>,
    store: &RefCell<S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let state = item.item_state(store);
    let error = item.item_error(store);
    let color = match (state, &error) {
        (FormItemState::Invisible, _) => return,
        (FormItemState::Active, _) => Color::Blue,
        (FormItemState::Inactive, Some(_)) => Color::Red,
        (FormItemState::Inactive, None) => Color::Gray,
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title(store))
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        let symbol = match (state, &error) {
            (FormItemState::Active, _) => S_STEP_ACTIVE,
            (_, Some(_)) => S_STEP_ERROR,
            _ => S_STEP_INACTIVE,
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    if let Some(error) = error {
        let area_error = Rect::new(area.x + 2, area.y + 2, area.width.saturating_sub(2), 1);
        Paragraph::new(error).red().render(area_error, buf);
    }
}

fn item_height<S>(item: &impl FormItem<S>, store: &RefCell<S>) -> u16 {
    match item.item_error(store) {
        Some(_) => 4,
        None => 3,
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1.min(area.height.saturating_sub(2)),
    }
}

fn item_is_visible<S>(item: &impl FormItem<S>, store: &RefCell<S>) -> bool {
    !matches!(item.item_state(store), FormItemState::Invisible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use std::rc::Rc;

    #[derive(Default)]
    struct Store {
        text: String,
        flags: [bool; 2],
        choice: u8,
        hidden: bool,
    }

    struct TextAccess;

    impl Access<Store, String> for TextAccess {
        fn get(&self, store: &RefCell<Store>) -> String {
            store.borrow().text.clone()
        }

        fn set(&self, _dispatcher: &mut Dispatcher, value: String) -> bool {
            SINK.with(|a| a.borrow_mut().replace(value));
            true
        }

        fn error(&self, store: &RefCell<Store>) -> Option<String> {
            store.borrow().text.is_empty().then(|| "required".to_string())
        }
    }

    struct FlagAccess(usize);

    impl Access<Store, bool> for FlagAccess {
        fn get(&self, store: &RefCell<Store>) -> bool {
            store.borrow().flags[self.0]
        }

        fn set(&self, _dispatcher: &mut Dispatcher, value: bool) -> bool {
            FLAG_SINK.with(|a| a.borrow_mut().replace((self.0, value)));
            true
        }
    }

    struct ChoiceAccess;

    impl Access<Store, u8> for ChoiceAccess {
        fn get(&self, store: &RefCell<Store>) -> u8 {
            store.borrow().choice
        }

        fn set(&self, _dispatcher: &mut Dispatcher, value: u8) -> bool {
            CHOICE_SINK.with(|a| a.borrow_mut().replace(value));
            true
        }
    }

    thread_local! {
        static SINK: RefCell<Option<String>> = const { RefCell::new(None) };
        static FLAG_SINK: RefCell<Option<(usize, bool)>> = const { RefCell::new(None) };
        static CHOICE_SINK: RefCell<Option<u8>> = const { RefCell::new(None) };
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn input_inserts_at_the_grapheme_cursor() {
        let store = RefCell::new(Store {
            text: "a中b".to_string(),
            ..Default::default()
        });
        let mut dispatcher = Dispatcher::new();
        let mut input = Input::new("Name", TextAccess);
        input.activate(&mut dispatcher, &store);
        assert_eq!(input.grapheme_index, 3);

        input.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Left));
        input.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Char('x')));
        assert_eq!(SINK.with(|a| a.borrow_mut().take()), Some("a中xb".to_string()));

        // the store still holds "a中b", three graphemes are four columns wide
        let cursor = input.get_cursor_position(&store, Rect::new(10, 5, 20, 1));
        assert_eq!(cursor, Some((14, 5)));
    }

    #[test]
    fn inactive_input_ignores_keys() {
        let store = RefCell::new(Store::default());
        let mut dispatcher = Dispatcher::new();
        let mut input = Input::new("Name", TextAccess);
        let msg = input.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Char('x')));
        assert_eq!(msg, None);
        assert_eq!(input.item_error(&store), Some("required".to_string()));
    }

    #[test]
    fn checkbox_toggles_the_option_under_the_cursor() {
        let store = RefCell::new(Store::default());
        let mut dispatcher = Dispatcher::new();
        let mut group = CheckboxGroup::new(
            "Transport",
            vec![("Bus".to_string(), FlagAccess(0)), ("Train".to_string(), FlagAccess(1))],
        );
        group.activate(&mut dispatcher, &store);
        group.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Right));
        group.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Char(' ')));
        assert_eq!(FLAG_SINK.with(|a| a.borrow_mut().take()), Some((1, true)));
    }

    #[test]
    fn radio_wraps_around() {
        let store = RefCell::new(Store {
            choice: 1,
            ..Default::default()
        });
        let mut dispatcher = Dispatcher::new();
        let mut radio = RadioGroup::new(
            "Kind",
            vec![1, 2],
            vec!["One".to_string(), "Two".to_string()],
            ChoiceAccess,
        );
        radio.activate(&mut dispatcher, &store);
        radio.on_key(&mut dispatcher, &store, Rect::default(), key(KeyCode::Left));
        assert_eq!(CHOICE_SINK.with(|a| a.borrow_mut().take()), Some(2));
    }

    #[test]
    fn form_skips_invisible_items_and_dispatches_step_keys() {
        struct Hidden(Input<Store, TextAccess>);

        impl Component<Store> for Hidden {
            fn render(&self, store: &RefCell<Store>, area: Rect, buf: &mut Buffer) {
                self.0.render(store, area, buf)
            }
        }

        impl FormItem<Store> for Hidden {
            fn item_title(&self, store: &RefCell<Store>) -> &str {
                self.0.item_title(store)
            }

            fn item_state(&self, store: &RefCell<Store>) -> FormItemState {
                match store.borrow().hidden {
                    true => FormItemState::Invisible,
                    false => self.0.item_state(store),
                }
            }
        }

        let store = RefCell::new(Store {
            text: "x".to_string(),
            hidden: true,
            ..Default::default()
        });
        let items: Vec<Box<dyn FormItem<Store>>> = vec![
            Box::new(Input::new("A", TextAccess)),
            Box::new(Hidden(Input::new("B", TextAccess))),
            Box::new(Input::new("C", TextAccess)),
        ];
        let mut form = Form::new(items);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        let sink = seen.clone();
        dispatcher.register(Rc::new(RefCell::new(move |a: &Action| {
            sink.borrow_mut().push(a.clone())
        })));

        let area = Rect::new(0, 0, 40, 20);
        form.activate(&mut dispatcher, &store);
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Down));
        assert_eq!(form.item_index(), 2);
        assert_eq!(form.on_key(&mut dispatcher, &store, area, key(KeyCode::Down)), None);

        form.on_key(&mut dispatcher, &store, area, key(KeyCode::PageUp));
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec![Action::PreviousStep, Action::NextStep]);
    }

    #[test]
    fn form_scrolls_to_keep_the_focused_item_in_view() {
        let store = RefCell::new(Store {
            text: "x".to_string(),
            ..Default::default()
        });
        let items: Vec<Box<dyn FormItem<Store>>> = (0..10)
            .map(|i| {
                Box::new(Input::new(format!("Item {i}"), TextAccess)) as Box<dyn FormItem<Store>>
            })
            .collect();
        let form = Form::new(items).with_item_index(8);

        // 2 rows of margin, room for three items
        let placed = form.placements(&store, Rect::new(0, 0, 40, 11));
        let indices: Vec<usize> = placed.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![6, 7, 8]);
    }
}
