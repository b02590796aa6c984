// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use baatasari_core::fixtures::{EventStatus, MANAGED_EVENT_PAGES, ManagedEvent, RowAction};
use baatasari_core::{AnalyticsProjection, DraftSeed, Organizer};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::{Color, Colorize};

use crate::cmd_analytics::print_overview;
use crate::cmd_create_event::CmdCreateEvent;
use crate::formatter::Formatter;
use crate::table::{PaddingDirection, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdManageEventsList {
    /// One-based page, every page when `None`.
    pub page: Option<usize>,
    pub output_format: ArgOutputFormat,
}

impl CmdManageEventsList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List managed events, page by page")
            .arg(
                arg!(-p --page <PAGE> "Show only this page")
                    .value_parser(value_parser!(u16).range(1..=MANAGED_EVENT_PAGES.len() as i64)),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            page: matches.get_one::<u16>("page").map(|a| *a as usize),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, _organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing managed events...");
        let pages = match self.page {
            Some(page) => page..=page,
            None => 1..=MANAGED_EVENT_PAGES.len(),
        };

        let formatter = Formatter::new(EventColumn::ALL.to_vec())
            .with_output_format(self.output_format)
            .with_header();
        for page in pages {
            let rows = EventRow::page(page);
            if self.output_format == ArgOutputFormat::Table {
                println!("🗂  {}", format!("Page {page}/{}", MANAGED_EVENT_PAGES.len()).bold());
            }
            println!("{}", formatter.format(&rows));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdManageEventsView {
    pub page: usize,
    pub row: usize,
}

impl CmdManageEventsView {
    pub const NAME: &str = "view";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Open a managed event in the analytics overview")
            .arg(arg_row())
            .arg(arg_page())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (page, row) = get_page_row(matches);
        Self { page, row }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "viewing managed event...");
        let event = managed_event(self.page, self.row)?;
        organizer
            .record_analytics(&AnalyticsProjection::from(event))
            .await?;
        print_overview(&organizer.overview().await);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdManageEventsAct {
    pub page: usize,
    pub row: usize,
    pub no_wizard: bool,
}

impl CmdManageEventsAct {
    pub const NAME: &str = "act";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an upcoming event, or repeat a past one, in the wizard")
            .arg(arg_row())
            .arg(arg_page())
            .arg(arg_no_wizard())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let (page, row) = get_page_row(matches);
        Self {
            page,
            row,
            no_wizard: matches.get_flag("no-wizard"),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "acting on managed event...");
        let event = managed_event(self.page, self.row)?;
        organizer
            .seed_draft(&DraftSeed::for_managed_event(event))
            .await?;
        println!("{} {} {}", "►".green(), event.action(), event.name.bold());
        open_seeded(organizer, self.no_wizard).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CmdManageEventsReschedule {
    pub no_wizard: bool,
}

impl CmdManageEventsReschedule {
    pub const NAME: &str = "reschedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Reschedule the upcoming highlighted event in the wizard")
            .arg(arg_no_wizard())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            no_wizard: matches.get_flag("no-wizard"),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "rescheduling upcoming event...");
        organizer.seed_draft(&DraftSeed::for_reschedule()).await?;
        open_seeded(organizer, self.no_wizard).await
    }
}

/// Opens the wizard on a freshly seeded draft, skipping the welcome screen.
pub async fn open_seeded(organizer: &Organizer, no_wizard: bool) -> Result<(), Box<dyn Error>> {
    match no_wizard {
        true => {
            println!(
                "{}",
                "Draft prefilled, run `baatasari create-event` to continue.".italic()
            );
            Ok(())
        }
        false => CmdCreateEvent::wizard(organizer, false).await,
    }
}

pub fn arg_no_wizard() -> Arg {
    arg!(--"no-wizard" "Only prefill the draft, do not open the wizard")
}

fn arg_row() -> Arg {
    arg!(row: <ROW> "Row number on the page, starting at 1")
        .value_parser(value_parser!(u16).range(1..))
}

fn arg_page() -> Arg {
    arg!(-p --page <PAGE> "Page the row is on")
        .value_parser(value_parser!(u16).range(1..=MANAGED_EVENT_PAGES.len() as i64))
        .default_value("1")
}

fn get_page_row(matches: &ArgMatches) -> (usize, usize) {
    let get = |id| matches.get_one::<u16>(id).map_or(1, |a| *a as usize);
    (get("page"), get("row"))
}

fn managed_event(page: usize, row: usize) -> Result<&'static ManagedEvent, Box<dyn Error>> {
    let events = page
        .checked_sub(1)
        .and_then(|i| MANAGED_EVENT_PAGES.get(i))
        .ok_or_else(|| format!("No page {page}"))?;
    let event = row
        .checked_sub(1)
        .and_then(|i| events.get(i))
        .ok_or_else(|| format!("Page {page} has {} rows, no row {row}", events.len()))?;
    Ok(event)
}

#[derive(Debug, Clone, Copy)]
struct EventRow {
    row: usize,
    event: &'static ManagedEvent,
}

impl EventRow {
    fn page(page: usize) -> Vec<EventRow> {
        MANAGED_EVENT_PAGES
            .get(page.saturating_sub(1))
            .map(|events| {
                events
                    .iter()
                    .enumerate()
                    .map(|(i, event)| EventRow { row: i + 1, event })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Row,
    Date,
    Name,
    Category,
    Status,
    Action,
}

impl EventColumn {
    const ALL: [EventColumn; 6] = [
        EventColumn::Row,
        EventColumn::Date,
        EventColumn::Name,
        EventColumn::Category,
        EventColumn::Status,
        EventColumn::Action,
    ];
}

impl TableColumn<EventRow> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Row => "#",
            EventColumn::Date => "Date",
            EventColumn::Name => "Event",
            EventColumn::Category => "Category",
            EventColumn::Status => "Status",
            EventColumn::Action => "Action",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a EventRow) -> Cow<'a, str> {
        match self {
            EventColumn::Row => data.row.to_string().into(),
            EventColumn::Date => data.event.date.into(),
            EventColumn::Name => data.event.name.into(),
            EventColumn::Category => data.event.category.into(),
            EventColumn::Status => data.event.status.to_string().into(),
            EventColumn::Action => data.event.action().to_string().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Row => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &EventRow) -> Option<Color> {
        match self {
            EventColumn::Status => Some(match data.event.status {
                EventStatus::Ongoing => Color::Green,
                EventStatus::Upcoming => Color::Cyan,
                EventStatus::Past => Color::BrightBlack,
            }),
            EventColumn::Action if data.event.action() == RowAction::Repeat => Some(Color::Yellow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baatasari_core::{Config as CoreConfig, MemoryStorage};
    use std::sync::Arc;

    fn organizer() -> Organizer {
        Organizer::with_storage(CoreConfig::default(), Arc::new(MemoryStorage::new()))
    }

    fn matches(sub: Command, args: &[&str]) -> ArgMatches {
        let name = sub.get_name().to_string();
        let cmd = Command::new("test").subcommand(sub);
        let matches = cmd.try_get_matches_from(args).unwrap();
        matches.subcommand_matches(&name).unwrap().clone()
    }

    #[test]
    fn test_parse_list() {
        let m = matches(CmdManageEventsList::command(), &["test", "list", "-p", "2"]);
        let cmd = CmdManageEventsList::from(&m);
        assert_eq!(cmd.page, Some(2));

        let cmd = Command::new("test").subcommand(CmdManageEventsList::command());
        assert!(cmd.try_get_matches_from(["test", "list", "-p", "3"]).is_err());
    }

    #[test]
    fn test_parse_act_defaults_to_first_page() {
        let m = matches(CmdManageEventsAct::command(), &["test", "act", "2"]);
        let cmd = CmdManageEventsAct::from(&m);
        assert_eq!((cmd.page, cmd.row), (1, 2));
        assert!(!cmd.no_wizard);
    }

    #[test]
    fn managed_event_rejects_missing_rows() {
        assert_eq!(managed_event(1, 1).unwrap().name, "Elyzium Band Live");
        assert_eq!(managed_event(2, 3).unwrap().status, EventStatus::Past);
        assert!(managed_event(2, 4).is_err());
        assert!(managed_event(3, 1).is_err());
        assert!(managed_event(1, 0).is_err());
    }

    #[test]
    fn past_rows_offer_repeat() {
        let rows = EventRow::page(2);
        assert_eq!(rows.len(), 3);
        assert_eq!(EventColumn::Action.format(&rows[0]), "Repeat");
        assert_eq!(EventColumn::Row.format(&rows[2]), "3");
        assert!(EventRow::page(9).is_empty());
    }

    #[tokio::test]
    async fn view_records_projection() {
        let organizer = organizer();
        let cmd = CmdManageEventsView { page: 1, row: 3 };
        cmd.run(&organizer).await.unwrap();

        let overview = organizer.overview().await;
        assert_eq!(overview.event_name, "GeoSpace Bharat 2025");
        assert_eq!(overview.status, "Upcoming");
        assert_eq!(overview.location, "Visakhapatnam");
    }

    #[tokio::test]
    async fn repeat_seeds_draft_without_schedule() {
        let organizer = organizer();
        let cmd = CmdManageEventsAct {
            page: 2,
            row: 1,
            no_wizard: true,
        };
        cmd.run(&organizer).await.unwrap();

        let session = organizer.open_wizard().await;
        assert_eq!(session.draft().event_name, "MARITZA CORREA Vizag");
        assert_eq!(session.draft().date, "");
    }

    #[tokio::test]
    async fn reschedule_seeds_highlight() {
        let organizer = organizer();
        let cmd = CmdManageEventsReschedule { no_wizard: true };
        cmd.run(&organizer).await.unwrap();

        let session = organizer.open_wizard().await;
        assert_eq!(session.draft().date, "2025-05-28");
        assert_eq!(session.draft().end_time, "20:30");
    }
}
