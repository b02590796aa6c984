// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use baatasari_core::{APP_NAME, Organizer};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_analytics::CmdAnalytics;
use crate::cmd_artist_request::{CmdArtistRequestHost, CmdArtistRequestList};
use crate::cmd_create_event::CmdCreateEvent;
use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_draft::{
    CmdDraftNext, CmdDraftPhoto, CmdDraftPrev, CmdDraftPush, CmdDraftRemove, CmdDraftSection,
    CmdDraftSet, CmdDraftShow, CmdDraftValidate,
};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_manage_events::{
    CmdManageEventsAct, CmdManageEventsList, CmdManageEventsReschedule, CmdManageEventsView,
};
use crate::cmd_stalls::{CmdStallsApprove, CmdStallsDeny, CmdStallsList, CmdStallsShow};
use crate::config::{Config, parse_config};
use crate::util::ArgOutputFormat;

const GROUP_DRAFT: &str = "draft";
const GROUP_MANAGE_EVENTS: &str = "manage-events";
const GROUP_STALLS: &str = "stalls";
const GROUP_ARTIST_REQUEST: &str = "artist-request";

type CmdResult = Result<(), Box<dyn Error>>;

/// Run the Baatasari command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Baatasari. Plan, ticket and run your events from the terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $BAATASARI_CONFIG, then \
$XDG_CONFIG_HOME/baatasari/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/baatasari/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(CmdCreateEvent::command())
            .subcommand(
                Command::new(GROUP_DRAFT)
                    .alias("d")
                    .about("Work on the saved event draft without the wizard screen")
                    .subcommand(CmdDraftShow::command())
                    .subcommand(CmdDraftSet::command())
                    .subcommand(CmdDraftPush::command())
                    .subcommand(CmdDraftRemove::command())
                    .subcommand(CmdDraftPhoto::command())
                    .subcommand(CmdDraftNext::command())
                    .subcommand(CmdDraftPrev::command())
                    .subcommand(CmdDraftSection::command())
                    .subcommand(CmdDraftValidate::command()),
            )
            .subcommand(
                Command::new(GROUP_MANAGE_EVENTS)
                    .alias("events")
                    .about("Browse your events, open their analytics or reopen them in the wizard")
                    .subcommand(CmdManageEventsList::command())
                    .subcommand(CmdManageEventsView::command())
                    .subcommand(CmdManageEventsAct::command())
                    .subcommand(CmdManageEventsReschedule::command()),
            )
            .subcommand(CmdAnalytics::command())
            .subcommand(
                Command::new(GROUP_STALLS)
                    .about("Review vendor stalls")
                    .subcommand(CmdStallsList::command())
                    .subcommand(CmdStallsApprove::command())
                    .subcommand(CmdStallsDeny::command())
                    .subcommand(CmdStallsShow::command()),
            )
            .subcommand(
                Command::new(GROUP_ARTIST_REQUEST)
                    .alias("artists")
                    .about("See what artists ask for and host their events")
                    .subcommand(CmdArtistRequestList::command())
                    .subcommand(CmdArtistRequestHost::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some((CmdCreateEvent::NAME, matches)) => CreateEvent(CmdCreateEvent::from(matches)),
            Some((GROUP_DRAFT, matches)) => match matches.subcommand() {
                Some((CmdDraftShow::NAME, matches)) => DraftShow(CmdDraftShow::from(matches)),
                Some((CmdDraftSet::NAME, matches)) => DraftSet(CmdDraftSet::from(matches)),
                Some((CmdDraftPush::NAME, matches)) => DraftPush(CmdDraftPush::from(matches)?),
                Some((CmdDraftRemove::NAME, matches)) => {
                    DraftRemove(CmdDraftRemove::from(matches)?)
                }
                Some((CmdDraftPhoto::NAME, matches)) => DraftPhoto(CmdDraftPhoto::from(matches)),
                Some((CmdDraftNext::NAME, matches)) => DraftNext(CmdDraftNext::from(matches)),
                Some((CmdDraftPrev::NAME, matches)) => DraftPrev(CmdDraftPrev::from(matches)),
                Some((CmdDraftSection::NAME, matches)) => {
                    DraftSection(CmdDraftSection::from(matches))
                }
                Some((CmdDraftValidate::NAME, matches)) => {
                    DraftValidate(CmdDraftValidate::from(matches))
                }
                None => DraftShow(CmdDraftShow {
                    output_format: ArgOutputFormat::Table,
                }),
                Some((name, _)) => return Err(unknown(GROUP_DRAFT, name)),
            },
            Some((GROUP_MANAGE_EVENTS, matches)) => match matches.subcommand() {
                Some((CmdManageEventsList::NAME, matches)) => {
                    ManageEventsList(CmdManageEventsList::from(matches))
                }
                Some((CmdManageEventsView::NAME, matches)) => {
                    ManageEventsView(CmdManageEventsView::from(matches))
                }
                Some((CmdManageEventsAct::NAME, matches)) => {
                    ManageEventsAct(CmdManageEventsAct::from(matches))
                }
                Some((CmdManageEventsReschedule::NAME, matches)) => {
                    ManageEventsReschedule(CmdManageEventsReschedule::from(matches))
                }
                None => ManageEventsList(CmdManageEventsList {
                    page: None,
                    output_format: ArgOutputFormat::Table,
                }),
                Some((name, _)) => return Err(unknown(GROUP_MANAGE_EVENTS, name)),
            },
            Some((CmdAnalytics::NAME, matches)) => Analytics(CmdAnalytics::from(matches)),
            Some((GROUP_STALLS, matches)) => match matches.subcommand() {
                Some((CmdStallsList::NAME, matches)) => StallsList(CmdStallsList::from(matches)),
                Some((CmdStallsApprove::NAME, matches)) => {
                    StallsApprove(CmdStallsApprove::from(matches)?)
                }
                Some((CmdStallsDeny::NAME, matches)) => StallsDeny(CmdStallsDeny::from(matches)?),
                Some((CmdStallsShow::NAME, matches)) => StallsShow(CmdStallsShow::from(matches)?),
                None => StallsList(CmdStallsList {
                    all: false,
                    output_format: ArgOutputFormat::Table,
                }),
                Some((name, _)) => return Err(unknown(GROUP_STALLS, name)),
            },
            Some((GROUP_ARTIST_REQUEST, matches)) => match matches.subcommand() {
                Some((CmdArtistRequestList::NAME, matches)) => {
                    ArtistRequestList(CmdArtistRequestList::from(matches))
                }
                Some((CmdArtistRequestHost::NAME, matches)) => {
                    ArtistRequestHost(CmdArtistRequestHost::from(matches)?)
                }
                None => ArtistRequestList(CmdArtistRequestList {
                    output_format: ArgOutputFormat::Table,
                }),
                Some((name, _)) => return Err(unknown(GROUP_ARTIST_REQUEST, name)),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Dashboard(CmdDashboard),
            Some((name, _)) => return Err(unknown(APP_NAME, name)),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

fn unknown(group: &str, name: &str) -> Box<dyn Error> {
    format!("Unknown command `{group} {name}`").into()
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(CmdDashboard),

    /// Open the event wizard
    CreateEvent(CmdCreateEvent),

    /// Show the saved draft
    DraftShow(CmdDraftShow),

    /// Set a draft field
    DraftSet(CmdDraftSet),

    /// Append a list entry
    DraftPush(CmdDraftPush),

    /// Remove a list entry
    DraftRemove(CmdDraftRemove),

    /// Attach or clear the event photo
    DraftPhoto(CmdDraftPhoto),

    /// Go to the next wizard step
    DraftNext(CmdDraftNext),

    /// Go to the previous wizard step
    DraftPrev(CmdDraftPrev),

    /// Collapse or expand a form section
    DraftSection(CmdDraftSection),

    /// Validate the draft
    DraftValidate(CmdDraftValidate),

    /// List managed events
    ManageEventsList(CmdManageEventsList),

    /// Open a managed event in analytics
    ManageEventsView(CmdManageEventsView),

    /// Edit or repeat a managed event
    ManageEventsAct(CmdManageEventsAct),

    /// Reschedule the upcoming event
    ManageEventsReschedule(CmdManageEventsReschedule),

    /// Show analytics
    Analytics(CmdAnalytics),

    /// List stalls
    StallsList(CmdStallsList),

    /// Approve a stall
    StallsApprove(CmdStallsApprove),

    /// Deny a stall
    StallsDeny(CmdStallsDeny),

    /// Show a stall
    StallsShow(CmdStallsShow),

    /// List artist requests
    ArtistRequestList(CmdArtistRequestList),

    /// Host an artist request
    ArtistRequestHost(CmdArtistRequestHost),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            CreateEvent(a)            => Self::run_with(config, |x, cfg| a.run(x, cfg).boxed_local()).await,
            DraftShow(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftSet(a)               => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftPush(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftRemove(a)            => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftPhoto(a)             => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftNext(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftPrev(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftSection(a)           => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            DraftValidate(a)          => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ManageEventsList(a)       => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ManageEventsView(a)       => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ManageEventsAct(a)        => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ManageEventsReschedule(a) => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            Analytics(a)              => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            StallsList(a)             => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            StallsApprove(a)          => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            StallsDeny(a)             => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            StallsShow(a)             => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ArtistRequestList(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            ArtistRequestHost(a)      => Self::run_with(config, |x, _| a.run(x).boxed_local()).await,
            GenerateCompletion(a)     => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Organizer, &'a Config) -> LocalBoxFuture<'a, CmdResult>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, config) = parse_config(config).await?;
        let organizer = Organizer::new(core_config).await?;

        f(&organizer, &config).await?;

        organizer.close().await?;
        Ok(())
    }
}
