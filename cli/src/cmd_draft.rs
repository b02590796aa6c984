// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wizard operations without the terminal UI, one command per operation.

use std::borrow::Cow;
use std::error::Error;
use std::path::PathBuf;

use baatasari_core::{
    EventDraft, FieldUpdate, FormErrors, ListField, Organizer, SECTIONS, Transition,
    WizardSession, validate,
};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::{Color, Colorize};
use serde_json::Value;

use crate::cmd_create_event::print_submitted;
use crate::formatter::Formatter;
use crate::table::TableColumn;
use crate::util::{ArgOutputFormat, truncate_width};

const VALUE_MAX_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct CmdDraftShow {
    pub output_format: ArgOutputFormat,
}

impl CmdDraftShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the saved draft, its step and open sections")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing draft...");
        let session = organizer.open_wizard().await;
        match self.output_format {
            ArgOutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(session.draft())?);
            }
            ArgOutputFormat::Table => {
                println!("📝 {}", session.step().to_string().bold());
                let rows = FieldRow::flatten(session.draft())?;
                let formatter = Formatter::new(FieldColumn::ALL.to_vec());
                println!("{}", formatter.format(&rows));

                let closed: Vec<&str> = session
                    .sections()
                    .iter()
                    .filter_map(|(name, open)| (!open).then_some(name))
                    .collect();
                if !closed.is_empty() {
                    println!("{} {}", "Collapsed:".dimmed(), closed.join(", "));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdDraftSet {
    pub path: String,
    pub value: String,
}

impl CmdDraftSet {
    pub const NAME: &str = "set";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Set a field by its dotted path, e.g. `contactInfo.email`")
            .arg(arg!(path: <PATH> "Dotted field path, e.g. `audienceCategory.0.price`"))
            .arg(arg!(value: <VALUE> "New value").allow_hyphen_values(true))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: get_string(matches, "path"),
            value: get_string(matches, "value"),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating draft field...");
        let update = FieldUpdate::parse(&self.path, &self.value)?;
        let mut session = organizer.open_wizard().await;
        session.update(update)?;
        session.flush().await?;

        let value = FieldRow::flatten(session.draft())?
            .into_iter()
            .find(|a| a.path == self.path)
            .map(|a| a.value)
            .unwrap_or(self.value);
        println!("{} {} = {}", "✓".green(), self.path, value.bold());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdDraftPush {
    pub list: ListField,
}

impl CmdDraftPush {
    pub const NAME: &str = "push";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Append an empty entry to a list, e.g. `sponsors.coPartners`")
            .arg(arg_list())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            list: get_list(matches)?,
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "appending list entry...");
        let mut session = organizer.open_wizard().await;
        session.update(FieldUpdate::Push(self.list))?;
        session.flush().await?;
        print_list_len(&session, self.list);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdDraftRemove {
    pub list: ListField,
    pub index: usize,
}

impl CmdDraftRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Remove an entry from a list")
            .arg(arg_list())
            .arg(
                arg!(index: <INDEX> "Zero-based index of the entry")
                    .value_parser(value_parser!(usize)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let index = matches
            .get_one::<usize>("index")
            .copied()
            .ok_or("Entry index is required")?;
        Ok(Self {
            list: get_list(matches)?,
            index,
        })
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "removing list entry...");
        let mut session = organizer.open_wizard().await;
        session.update(FieldUpdate::Remove(self.list, self.index))?;
        session.flush().await?;
        print_list_len(&session, self.list);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdDraftPhoto {
    pub path: Option<PathBuf>,
}

impl CmdDraftPhoto {
    pub const NAME: &str = "photo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Attach the event photo (JPG, PNG or GIF up to 5MB), or clear it")
            .arg(
                arg!(path: [PATH] "Image file to attach, omit with --clear")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .required_unless_present("clear"),
            )
            .arg(arg!(--clear "Remove the attached photo").conflicts_with("path"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: matches.get_one::<PathBuf>("path").cloned(),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating event photo...");
        let mut session = organizer.open_wizard().await;
        let attached = match &self.path {
            Some(path) => session.attach_photo(path).await,
            None => session.update(FieldUpdate::Photo(None)),
        };
        // a rejected photo still clears the previous one
        session.flush().await?;
        attached?;

        match &session.draft().event_photo {
            Some(photo) => println!(
                "{} {} ({}, {} bytes)",
                "✓ Attached".green(),
                photo.name.bold(),
                photo.mime_type,
                photo.size
            ),
            None => println!("{}", "✓ Photo removed".green()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CmdDraftNext;

impl CmdDraftNext {
    pub const NAME: &str = "next";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Go to the next step, or validate and submit on the last one")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDraftNext
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "advancing wizard...");
        let mut session = organizer.open_wizard().await;
        let transition = session.next().await?;
        session.flush().await?;

        match transition {
            Transition::Moved(step) => println!("{} {}", "►".green(), step),
            Transition::Stayed => println!("{} {}", "►".green(), session.step()),
            Transition::Rejected(step) => {
                println!(
                    "{} {} fields need attention, back to {}",
                    "✗".red(),
                    session.errors().len(),
                    step.to_string().bold()
                );
                print_errors(session.errors(), ArgOutputFormat::Table);
            }
            Transition::Submitted(draft) => print_submitted(&draft),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CmdDraftPrev;

impl CmdDraftPrev {
    pub const NAME: &str = "prev";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("back")
            .about("Go back to the previous step")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDraftPrev
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving wizard back...");
        let mut session = organizer.open_wizard().await;
        if session.previous().await? == Transition::Stayed {
            println!("{}", "Already on the first step".italic());
        }
        session.flush().await?;
        println!("{} {}", "►".green(), session.step());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdDraftSection {
    pub name: Option<String>,
}

impl CmdDraftSection {
    pub const NAME: &str = "section";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Collapse or expand a form section, or list them all")
            .arg(
                arg!(name: [NAME] "Section to toggle")
                    .value_parser(clap::builder::PossibleValuesParser::new(SECTIONS)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: matches.get_one::<String>("name").cloned(),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "toggling section...");
        let mut session = organizer.open_wizard().await;
        match &self.name {
            Some(name) => {
                let open = session.toggle_section(name).await?;
                println!("{name}: {}", open_label(open));
            }
            None => {
                for name in SECTIONS {
                    println!("{name}: {}", open_label(session.sections().is_open(name)));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdDraftValidate {
    pub output_format: ArgOutputFormat,
}

impl CmdDraftValidate {
    pub const NAME: &str = "validate";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("check")
            .about("Check the draft without leaving the current step")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "validating draft...");
        let session = organizer.open_wizard().await;
        let errors = validate(session.draft());
        if errors.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "✓ The draft is ready to submit".green());
            return Ok(());
        }

        print_errors(&errors, self.output_format);
        Ok(())
    }
}

fn arg_list() -> clap::Arg {
    let lists: Vec<&'static str> = ListField::ALL.iter().map(|a| a.path()).collect();
    arg!(list: <LIST> "List path").value_parser(clap::builder::PossibleValuesParser::new(lists))
}

fn get_list(matches: &ArgMatches) -> Result<ListField, Box<dyn Error>> {
    let list = matches
        .get_one::<String>("list")
        .ok_or("List path is required")?;
    Ok(list.parse()?)
}

fn get_string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn print_list_len(session: &WizardSession, list: ListField) {
    let len = list.len(session.draft());
    println!("{} {list} has {len} entries", "✓".green());
}

fn print_errors(errors: &FormErrors, output_format: ArgOutputFormat) {
    let rows: Vec<(String, String)> = errors
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let formatter = Formatter::new(ErrorColumn::ALL.to_vec()).with_output_format(output_format);
    println!("{}", formatter.format(&rows));
}

fn open_label(open: bool) -> colored::ColoredString {
    match open {
        true => "open".green(),
        false => "collapsed".dimmed(),
    }
}

/// One leaf of the draft, addressed by its dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub path: String,
    pub value: String,
}

impl FieldRow {
    /// Leaves of the draft in path order; list entries are addressed by index.
    pub fn flatten(draft: &EventDraft) -> Result<Vec<FieldRow>, serde_json::Error> {
        let mut rows = Vec::new();
        Self::walk("", &serde_json::to_value(draft)?, &mut rows);
        Ok(rows)
    }

    fn walk(prefix: &str, value: &Value, rows: &mut Vec<FieldRow>) {
        let join = |key: &str| match prefix {
            "" => key.to_string(),
            _ => format!("{prefix}.{key}"),
        };
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    Self::walk(&join(key), value, rows);
                }
            }
            Value::Array(items) => {
                for (i, value) in items.iter().enumerate() {
                    Self::walk(&join(&i.to_string()), value, rows);
                }
            }
            Value::String(s) => rows.push(FieldRow {
                path: prefix.to_string(),
                value: s.clone(),
            }),
            Value::Null => rows.push(FieldRow {
                path: prefix.to_string(),
                value: String::new(),
            }),
            other => rows.push(FieldRow {
                path: prefix.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldColumn {
    Path,
    Value,
}

impl FieldColumn {
    const ALL: [FieldColumn; 2] = [FieldColumn::Path, FieldColumn::Value];
}

impl TableColumn<FieldRow> for FieldColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            FieldColumn::Path => "Field",
            FieldColumn::Value => "Value",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a FieldRow) -> Cow<'a, str> {
        match self {
            FieldColumn::Path => row.path.as_str().into(),
            FieldColumn::Value => truncate_width(&row.value, VALUE_MAX_WIDTH).into(),
        }
    }

    fn get_color(&self, row: &FieldRow) -> Option<Color> {
        match self {
            FieldColumn::Path if row.value.is_empty() => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ErrorColumn {
    Field,
    Message,
}

impl ErrorColumn {
    const ALL: [ErrorColumn; 2] = [ErrorColumn::Field, ErrorColumn::Message];
}

impl TableColumn<(String, String)> for ErrorColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ErrorColumn::Field => "Field",
            ErrorColumn::Message => "Message",
        }
        .into()
    }

    fn format<'a>(&self, (field, message): &'a (String, String)) -> Cow<'a, str> {
        match self {
            ErrorColumn::Field => field.as_str().into(),
            ErrorColumn::Message => message.as_str().into(),
        }
    }

    fn get_color(&self, _row: &(String, String)) -> Option<Color> {
        match self {
            ErrorColumn::Message => Some(Color::Red),
            ErrorColumn::Field => None,
        }
    }
}
