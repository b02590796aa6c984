// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use baatasari_core::fixtures::{ARTIST_REQUESTS, ARTISTS, Artist, ArtistRequest};
use baatasari_core::{DraftSeed, Organizer};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::{Color, Colorize};

use crate::cmd_manage_events::{arg_no_wizard, open_seeded};
use crate::formatter::Formatter;
use crate::table::{PaddingDirection, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdArtistRequestList {
    pub output_format: ArgOutputFormat,
}

impl CmdArtistRequestList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the events artists asked for, and the artists on board")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, _organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing artist requests...");
        let rows: Vec<RequestRow> = ARTIST_REQUESTS
            .iter()
            .enumerate()
            .map(|(i, request)| RequestRow { row: i + 1, request })
            .collect();

        let formatter = Formatter::new(RequestColumn::ALL.to_vec())
            .with_output_format(self.output_format)
            .with_header();
        println!("{}", formatter.format(&rows));
        if self.output_format == ArgOutputFormat::Json {
            return Ok(());
        }

        println!();
        println!("🎙  {}", "Artists".bold());
        let formatter = Formatter::new(ArtistColumn::ALL.to_vec());
        println!("{}", formatter.format(&ARTISTS));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdArtistRequestHost {
    pub request: &'static ArtistRequest,
    pub no_wizard: bool,
}

impl CmdArtistRequestHost {
    pub const NAME: &str = "host";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Host a requested event, prefilling the wizard with it")
            .arg(
                arg!(row: <ROW> "Request number from `artist-request list`")
                    .value_parser(value_parser!(u16).range(1..=ARTIST_REQUESTS.len() as i64)),
            )
            .arg(arg_no_wizard())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let row = matches
            .get_one::<u16>("row")
            .copied()
            .ok_or("Request number is required")?;
        let request = (row as usize)
            .checked_sub(1)
            .and_then(|i| ARTIST_REQUESTS.get(i))
            .ok_or_else(|| format!("No artist request {row}"))?;
        Ok(Self {
            request,
            no_wizard: matches.get_flag("no-wizard"),
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "hosting artist request...");
        organizer
            .seed_draft(&DraftSeed::for_artist_request(self.request))
            .await?;
        println!("{} Hosting {}", "►".green(), self.request.title.bold());
        open_seeded(organizer, self.no_wizard).await
    }
}

#[derive(Debug, Clone, Copy)]
struct RequestRow {
    row: usize,
    request: &'static ArtistRequest,
}

#[derive(Debug, Clone, Copy)]
enum RequestColumn {
    Row,
    Title,
    Interest,
    Tag,
    When,
    Location,
}

impl RequestColumn {
    const ALL: [RequestColumn; 6] = [
        RequestColumn::Row,
        RequestColumn::Title,
        RequestColumn::Interest,
        RequestColumn::Tag,
        RequestColumn::When,
        RequestColumn::Location,
    ];
}

impl TableColumn<RequestRow> for RequestColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            RequestColumn::Row => "#",
            RequestColumn::Title => "Event",
            RequestColumn::Interest => "Interested",
            RequestColumn::Tag => "Tag",
            RequestColumn::When => "Month",
            RequestColumn::Location => "Location",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a RequestRow) -> Cow<'a, str> {
        match self {
            RequestColumn::Row => data.row.to_string().into(),
            RequestColumn::Title => data.request.title.into(),
            RequestColumn::Interest => data.request.interest.to_string().into(),
            RequestColumn::Tag => data.request.tag.into(),
            RequestColumn::When => data.request.month.into(),
            RequestColumn::Location => data.request.location.into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            RequestColumn::Row | RequestColumn::Interest => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, _data: &RequestRow) -> Option<Color> {
        match self {
            RequestColumn::Tag => Some(Color::Magenta),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ArtistColumn {
    Name,
    Role,
}

impl ArtistColumn {
    const ALL: [ArtistColumn; 2] = [ArtistColumn::Name, ArtistColumn::Role];
}

impl TableColumn<Artist> for ArtistColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ArtistColumn::Name => "Name",
            ArtistColumn::Role => "Role",
        }
        .into()
    }

    fn format<'a>(&self, artist: &'a Artist) -> Cow<'a, str> {
        match self {
            ArtistColumn::Name => artist.name.into(),
            ArtistColumn::Role => artist.role.into(),
        }
    }

    fn get_color(&self, _artist: &Artist) -> Option<Color> {
        match self {
            ArtistColumn::Role => Some(Color::BrightBlack),
            ArtistColumn::Name => None,
        }
    }
}
