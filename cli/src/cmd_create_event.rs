// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use baatasari_core::{EventDraft, Organizer};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::config::Config;
use crate::tui;

/// Mode that skips the landing screen.
const MODE_CREATE: &str = "create";

#[derive(Debug, Clone, Default)]
pub struct CmdCreateEvent {
    pub mode: Option<String>,
    pub start_directly: bool,
}

impl CmdCreateEvent {
    pub const NAME: &str = "create-event";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Create an event with the step-by-step wizard")
            .arg(arg!(--mode <MODE> "Open mode, `create` skips the welcome screen"))
            .arg(arg!(--"start-directly" "Skip the welcome screen"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            mode: matches.get_one::<String>("mode").cloned(),
            start_directly: matches.get_flag("start-directly"),
        }
    }

    /// Whether the welcome screen is shown before the wizard.
    pub fn splash(&self, config: &Config) -> bool {
        config.splash && !self.start_directly && self.mode.as_deref() != Some(MODE_CREATE)
    }

    pub async fn run(self, organizer: &Organizer, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening event wizard...");
        Self::wizard(organizer, self.splash(config)).await
    }

    /// Runs the wizard and reports the outcome.
    pub async fn wizard(organizer: &Organizer, splash: bool) -> Result<(), Box<dyn Error>> {
        match tui::run_wizard(organizer, splash).await? {
            Some(draft) => print_submitted(&draft),
            None => {
                tracing::info!("user left the wizard, draft kept");
                println!("{}", "Draft saved, run `baatasari create-event` to continue.".italic());
            }
        }
        Ok(())
    }
}

pub fn print_submitted(draft: &EventDraft) {
    println!("{} {}", "✓ Event submitted:".green(), draft.event_name.bold());
    println!("   {} · {} {}", draft.category, draft.date, draft.time);
    println!("   {}", draft.venue);
    match draft.ticket_type {
        Some(ticket_type) => println!("   {} tickets: {}", ticket_type, draft.ticket_quantity),
        None => println!("   tickets: {}", draft.ticket_quantity),
    }
}
