// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use baatasari_core::Organizer;
use baatasari_core::fixtures::{
    CALENDAR_HIGHLIGHTS, CalendarHighlight, STAT_CARDS, StatCard, TrendDirection,
    UPCOMING_HIGHLIGHT,
};
use clap::{ArgMatches, Command};
use colored::{Color, Colorize};

use crate::formatter::Formatter;
use crate::table::{PaddingDirection, TableColumn};

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard: headline numbers, the upcoming event and busy dates")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDashboard
    }

    /// Show the dashboard built from the static datasets.
    pub async fn run(self, _organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");

        println!("📊 {}", "Overview".bold());
        let formatter = Formatter::new(StatColumn::ALL.to_vec());
        println!("{}", formatter.format(&STAT_CARDS));

        Self::print_upcoming();
        println!();

        println!("📅 {}", "Busy dates".bold());
        let formatter = Formatter::new(CalendarColumn::ALL.to_vec());
        println!("{}", formatter.format(&CALENDAR_HIGHLIGHTS));
        Ok(())
    }

    fn print_upcoming() {
        let event = UPCOMING_HIGHLIGHT;
        println!("🎤 {}", "Upcoming event".bold());
        println!(" {} {}", "►".green(), event.name.italic());
        println!("   {} · {} · {}", event.date, event.time, event.venue);
        println!("   {} · {}", event.category, event.highlight);
        for (label, value) in event.stats {
            println!("   {label}: {}", value.bold());
        }
        println!(
            "   {}",
            "Run `baatasari manage-events reschedule` to move it.".dimmed()
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum StatColumn {
    Label,
    Value,
    Trend,
}

impl StatColumn {
    const ALL: [StatColumn; 3] = [StatColumn::Label, StatColumn::Value, StatColumn::Trend];
}

impl TableColumn<StatCard> for StatColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            StatColumn::Label => "Label",
            StatColumn::Value => "Value",
            StatColumn::Trend => "Trend",
        }
        .into()
    }

    fn format<'a>(&self, card: &'a StatCard) -> Cow<'a, str> {
        match self {
            StatColumn::Label => card.label.into(),
            StatColumn::Value => card.value.into(),
            StatColumn::Trend => {
                let arrow = match card.direction {
                    TrendDirection::Up => "▲",
                    TrendDirection::Down => "▼",
                };
                format!("{arrow} {} {}", card.percentage, card.comparison).into()
            }
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            StatColumn::Value => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, card: &StatCard) -> Option<Color> {
        match (self, card.direction) {
            (StatColumn::Trend, TrendDirection::Up) => Some(Color::Green),
            (StatColumn::Trend, TrendDirection::Down) => Some(Color::Red),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CalendarColumn {
    Date,
    Count,
}

impl CalendarColumn {
    const ALL: [CalendarColumn; 2] = [CalendarColumn::Date, CalendarColumn::Count];
}

impl TableColumn<CalendarHighlight> for CalendarColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            CalendarColumn::Date => "Date",
            CalendarColumn::Count => "Attendees",
        }
        .into()
    }

    fn format<'a>(&self, day: &'a CalendarHighlight) -> Cow<'a, str> {
        match self {
            CalendarColumn::Date => day.date.into(),
            CalendarColumn::Count => format!("{} attendees", day.count).into(),
        }
    }

    fn get_color(&self, day: &CalendarHighlight) -> Option<Color> {
        match day.color {
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "pink" => Some(Color::Magenta),
            _ => None,
        }
    }
}
