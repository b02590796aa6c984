// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use baatasari_core::{EventDraft, Organizer, WizardSession};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::wizard_editor::{WizardPage, new_wizard_page};
use crate::tui::wizard_store::WizardStore;

/// Runs the event wizard in the terminal, returning the draft if it was submitted.
///
/// The draft is written to local storage before returning, whether or not it was
/// submitted.
pub async fn run_wizard(
    organizer: &Organizer,
    splash: bool,
) -> Result<Option<EventDraft>, Box<dyn Error>> {
    let mut session = organizer.open_wizard().await;
    let store = Rc::new(RefCell::new(WizardStore::new(&session)));

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut session, &store, splash).await;
    ratatui::restore();

    session.flush().await?;
    result
}

async fn run_loop(
    terminal: &mut DefaultTerminal,
    session: &mut WizardSession,
    store: &Rc<RefCell<WizardStore>>,
    splash: bool,
) -> Result<Option<EventDraft>, Box<dyn Error>> {
    if splash && !run_splash(terminal)? {
        return Ok(None);
    }

    let mut dispatcher = Dispatcher::new();
    WizardStore::register_to(store.clone(), &mut dispatcher);

    let mut shape = store.borrow().shape();
    let mut page = new_wizard_page(store, 0);
    page.activate(&mut dispatcher, store);

    loop {
        terminal.draw(|frame| draw(&page, store, frame))?;

        let message = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let area = terminal.get_frame().area();
                page.on_key(&mut dispatcher, store, area, key)
            }
            _ => None,
        };
        if message == Some(Message::Exit) {
            tracing::debug!("wizard closed without submitting");
            return Ok(None);
        }

        if let Some(draft) = WizardStore::apply_pending(store, session).await {
            return Ok(Some(*draft));
        }

        // rebuild when fields appear or vanish, back at the top after navigation
        let scroll_to_top = store.borrow_mut().take_scroll_request();
        let next = store.borrow().shape();
        if scroll_to_top || next != shape {
            let index = match scroll_to_top {
                true => 0,
                false => page.inner().item_index(),
            };
            page.deactivate(&mut dispatcher, store);
            page = new_wizard_page(store, index);
            page.activate(&mut dispatcher, store);
            shape = next;
        }
    }
}

fn draw(page: &WizardPage, store: &RefCell<WizardStore>, frame: &mut Frame) {
    let area = frame.area();
    page.render(store, area, frame.buffer_mut());
    if let Some(pos) = page.get_cursor_position(store, area) {
        frame.set_cursor_position(pos);
    }
}

/// Shows the landing screen; `false` when the user leaves without starting.
fn run_splash(terminal: &mut DefaultTerminal) -> Result<bool, Box<dyn Error>> {
    loop {
        terminal.draw(|frame| render_splash(frame.area(), frame.buffer_mut()))?;
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(true),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
                _ => {}
            }
        }
    }
}

fn render_splash(area: Rect, buf: &mut Buffer) {
    let block = Block::bordered()
        .border_set(border::ROUNDED)
        .title(Line::from(" Baatasari ".bold()).centered())
        .title_bottom(
            Line::from(vec![
                " Start ".into(),
                "<Enter>".blue().bold(),
                " Exit ".into(),
                "<Esc> ".blue().bold(),
            ])
            .centered(),
        );
    let inner = block.inner(area);
    block.render(area, buf);

    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let [_, body, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(64),
        Constraint::Fill(1),
    ])
    .areas(body);

    let text = vec![
        Line::from("Promote Your Event with Baatasari".bold()),
        Line::default(),
        Line::from(
            "Complete this form in about 5 minutes to get your event in front of \
             thousands of attendees.",
        ),
        Line::default(),
        Line::from("[ Get Started ]".reversed()),
    ];
    Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .render(body, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_names_the_call_to_action() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 16));
        render_splash(buf.area, &mut buf);

        let rows: Vec<String> = (0..16)
            .map(|y| (0..80).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect();
        assert!(rows.iter().any(|a| a.contains("Promote Your Event with Baatasari")));
        assert!(rows.iter().any(|a| a.contains("[ Get Started ]")));
    }
}
