// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, fmt::Display, str::FromStr};

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, FormItem, FormItemState, active_state};
use crate::tui::dispatcher::{Action, Dispatcher};

pub trait VisiblePredicate<S> {
    fn is_visible(&self, store: &RefCell<S>) -> bool;
}

/// A form item that is only visible if the predicate holds.
pub struct VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    item: T,
    predicate: P,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, T, P> VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    pub fn new(item: T, predicate: P) -> Self {
        Self {
            item,
            predicate,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, T, P> Component<S> for VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.item.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.item.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.item.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.deactivate(dispatcher, store);
    }
}

impl<S, T, P> FormItem<S> for VisibleIf<S, T, P>
where
    T: FormItem<S>,
    P: VisiblePredicate<S>,
{
    fn item_title(&self, store: &RefCell<S>) -> &str {
        self.item.item_title(store)
    }

    fn item_state(&self, store: &RefCell<S>) -> FormItemState {
        match self.predicate.is_visible(store) {
            true => self.item.item_state(store),
            false => FormItemState::Invisible,
        }
    }

    fn item_error(&self, store: &RefCell<S>) -> Option<String> {
        self.item.item_error(store)
    }
}

/// Dispatches an action when Enter is pressed on the wrapped item.
pub struct OnEnter<S, T: FormItem<S>> {
    item: T,
    action: Action,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, T: FormItem<S>> OnEnter<S, T> {
    pub fn new(item: T, action: Action) -> Self {
        Self {
            item,
            action,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, T: FormItem<S>> Component<S> for OnEnter<S, T> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.item.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.item.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        match event.code {
            KeyCode::Enter => {
                dispatcher.dispatch(self.action.clone());
                Some(Message::Handled)
            }
            _ => self.item.on_key(dispatcher, store, area, event),
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item.deactivate(dispatcher, store);
    }
}

impl<S, T: FormItem<S>> FormItem<S> for OnEnter<S, T> {
    fn item_title(&self, store: &RefCell<S>) -> &str {
        self.item.item_title(store)
    }

    fn item_state(&self, store: &RefCell<S>) -> FormItemState {
        self.item.item_state(store)
    }

    fn item_error(&self, store: &RefCell<S>) -> Option<String> {
        self.item.item_error(store)
    }
}

/// A collapsible heading, flipped with Enter or space.
pub struct Toggle<S, A: Access<S, bool>> {
    title: String,
    access: A,
    active: bool,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, A: Access<S, bool>> Toggle<S, A> {
    pub fn new(title: impl ToString, access: A) -> Self {
        Self {
            title: title.to_string(),
            access,
            active: false,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A: Access<S, bool>> Component<S> for Toggle<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let line = match self.access.get(store) {
            true => Line::from(vec!["▾ ".into(), "open".dim()]),
            false => Line::from(vec!["▸ ".into(), "closed, press <Enter> to expand".dim()]),
        };
        Paragraph::new(line).render(area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.active.then_some((area.x, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || !matches!(event.code, KeyCode::Enter | KeyCode::Char(' ')) {
            return None;
        }

        let open = self.access.get(store);
        self.access.set(dispatcher, !open);
        Some(Message::Handled)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: Access<S, bool>> FormItem<S> for Toggle<S, A> {
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

/// An access that converts between `T` and `String`, rejecting text that does not parse.
pub struct ParsedAccess<T, A> {
    inner: A,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, A> ParsedAccess<T, A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, T, A> Access<S, String> for ParsedAccess<T, A>
where
    T: Display + FromStr,
    A: Access<S, T>,
{
    fn get(&self, store: &RefCell<S>) -> String {
        self.inner.get(store).to_string()
    }

    fn set(&self, dispatcher: &mut Dispatcher, value: String) -> bool {
        match value.trim().parse::<T>() {
            Ok(v) => self.inner.set(dispatcher, v),
            Err(_) => {
                tracing::debug!(value, "failed to parse input");
                false
            }
        }
    }

    fn error(&self, store: &RefCell<S>) -> Option<String> {
        self.inner.error(store)
    }
}
