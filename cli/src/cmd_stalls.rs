// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use baatasari_core::fixtures::{STALL_SUBTITLE, STALLS, Stall, random_items};
use baatasari_core::{Notification, Organizer};
use clap::{Arg, ArgMatches, Command, arg};
use colored::{Color, Colorize};

use crate::formatter::Formatter;
use crate::table::{PaddingDirection, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdStallsList {
    pub all: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdStallsList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List stalls waiting for approval")
            .arg(arg!(-a --all "Include approved stalls"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing stalls...");
        let approvals = organizer.approvals().await?;
        let rows: Vec<StallRow> = match self.all {
            true => STALLS
                .iter()
                .map(|stall| StallRow {
                    stall,
                    approved: approvals.is_approved(stall.title),
                })
                .collect(),
            false => approvals
                .pending(&STALLS)
                .into_iter()
                .map(|stall| StallRow {
                    stall,
                    approved: false,
                })
                .collect(),
        };

        if rows.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "Every stall has been approved".italic());
            return Ok(());
        }

        let formatter = Formatter::new(StallColumn::ALL.to_vec())
            .with_output_format(self.output_format)
            .with_header();
        println!("{}", formatter.format(&rows));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStallsApprove {
    pub stall: &'static Stall,
}

impl CmdStallsApprove {
    pub const NAME: &str = "approve";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Approve a stall for the event")
            .arg(arg_title())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            stall: get_stall(matches)?,
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "approving stall...");
        let mut approvals = organizer.approvals().await?;
        match approvals.approve(self.stall.title).await? {
            Some(notification) => print_notification(&notification, Color::Green),
            None => println!("{} is already approved", self.stall.title.bold()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStallsDeny {
    pub stall: &'static Stall,
}

impl CmdStallsDeny {
    pub const NAME: &str = "deny";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("revoke")
            .about("Deny a stall, revoking its approval")
            .arg(arg_title())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            stall: get_stall(matches)?,
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "denying stall...");
        let mut approvals = organizer.approvals().await?;
        let notification = approvals.revoke(self.stall.title).await?;
        print_notification(&notification, Color::Red);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStallsShow {
    pub stall: &'static Stall,
}

impl CmdStallsShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show what a stall sells")
            .arg(arg_title())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            stall: get_stall(matches)?,
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing stall...");
        let approvals = organizer.approvals().await?;
        let status = match approvals.is_approved(self.stall.title) {
            true => "approved".green(),
            false => "pending".yellow(),
        };
        println!("🛍  {} [{}]", self.stall.title.bold(), status);
        println!("   {} · {}", self.stall.category, STALL_SUBTITLE.italic());

        let mut rng = rand::rng();
        for item in random_items(&mut rng) {
            println!("   • {:<12} ₹{}", item.name, item.price);
        }
        Ok(())
    }
}

fn arg_title() -> Arg {
    arg!(title: <TITLE> "Stall title, case insensitive")
}

fn get_stall(matches: &ArgMatches) -> Result<&'static Stall, Box<dyn Error>> {
    let title = matches
        .get_one::<String>("title")
        .ok_or("Stall title is required")?;
    find_stall(title)
}

fn find_stall(title: &str) -> Result<&'static Stall, Box<dyn Error>> {
    let title = title.trim();
    STALLS
        .iter()
        .find(|a| a.title.eq_ignore_ascii_case(title))
        .ok_or_else(|| {
            let known: Vec<&str> = STALLS.iter().map(|a| a.title).collect();
            format!("Unknown stall `{title}`, expected one of: {}", known.join(", ")).into()
        })
}

fn print_notification(notification: &Notification, color: Color) {
    println!("{}", notification.title.color(color).bold());
    println!("  {}", notification.description);
}

#[derive(Debug, Clone, Copy)]
struct StallRow {
    stall: &'static Stall,
    approved: bool,
}

#[derive(Debug, Clone, Copy)]
enum StallColumn {
    Title,
    Category,
    Status,
}

impl StallColumn {
    const ALL: [StallColumn; 3] = [StallColumn::Title, StallColumn::Category, StallColumn::Status];
}

impl TableColumn<StallRow> for StallColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            StallColumn::Title => "Stall",
            StallColumn::Category => "Category",
            StallColumn::Status => "Status",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a StallRow) -> Cow<'a, str> {
        match self {
            StallColumn::Title => row.stall.title.into(),
            StallColumn::Category => row.stall.category.into(),
            StallColumn::Status => match row.approved {
                true => "approved",
                false => "pending",
            }
            .into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, row: &StallRow) -> Option<Color> {
        match (self, row.approved) {
            (StallColumn::Status, true) => Some(Color::Green),
            (StallColumn::Status, false) => Some(Color::Yellow),
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

    #[test]
    fn test_parse_approve_matches_title_loosely() {
        let cmd = Command::new("test").subcommand(CmdStallsApprove::command());
        let matches = cmd
            .try_get_matches_from(["test", "approve", "taste town"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdStallsApprove::NAME).unwrap();
        let parsed = CmdStallsApprove::from(sub_matches).unwrap();
        assert_eq!(parsed.stall.title, "Taste Town");
    }

    #[test]
    fn test_parse_revoke_alias() {
        let cmd = Command::new("test").subcommand(CmdStallsDeny::command());
        let matches = cmd
            .try_get_matches_from(["test", "revoke", "Fun Zone"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdStallsDeny::NAME).unwrap();
        assert_eq!(CmdStallsDeny::from(sub_matches).unwrap().stall.title, "Fun Zone");
    }

    #[test]
    fn unknown_stall_is_an_error() {
        let err = find_stall("Noodle Bar").unwrap_err();
        assert!(err.to_string().contains("Twinkle Tales"));
    }

    #[tokio::test]
    async fn approve_then_deny() {
        let organizer = organizer();
        let stall = find_stall("Melody Makers").unwrap();
        CmdStallsApprove { stall }.run(&organizer).await.unwrap();
        CmdStallsApprove { stall }.run(&organizer).await.unwrap();

        let approvals = organizer.approvals().await.unwrap();
        assert_eq!(approvals.titles(), ["Melody Makers".to_string()]);
        assert_eq!(approvals.pending(&STALLS).len(), STALLS.len() - 1);

        CmdStallsDeny { stall }.run(&organizer).await.unwrap();
        assert!(organizer.approvals().await.unwrap().titles().is_empty());
    }

    #[test]
    fn status_column_reflects_approval() {
        let row = StallRow {
            stall: &STALLS[0],
            approved: true,
        };
        assert_eq!(StallColumn::Status.format(&row), "approved");
        assert_eq!(StallColumn::Status.get_color(&row), Some(Color::Green));
    }
}
