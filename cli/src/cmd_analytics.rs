// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use baatasari_core::fixtures::{
    EVENT_DETAILS, EVENT_STATS, REVENUE_STATS, REVIEWS, Review, STALLS,
};
use baatasari_core::{EventOverview, Metric, Organizer, Period, SeriesPoint};
use clap::{ArgMatches, Command, arg};
use colored::{Color, Colorize};

use crate::formatter::Formatter;
use crate::table::{PaddingDirection, TableColumn};
use crate::util::ArgOutputFormat;

const BAR_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct CmdAnalytics {
    pub metric: Metric,
    pub period: Period,
    pub output_format: ArgOutputFormat,
}

impl CmdAnalytics {
    pub const NAME: &str = "analytics";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show analytics of the selected event: sales, tickets, revenue and reviews")
            .arg(
                arg!(--metric <METRIC> "Quantity to chart: revenue or tickets")
                    .long_help("Quantity to chart: revenue or tickets. Anything else is revenue."),
            )
            .arg(
                arg!(--period <PERIOD> "Bucket size: weekly, monthly or yearly")
                    .long_help("Bucket size: weekly, monthly or yearly. Anything else is monthly."),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |id| matches.get_one::<String>(id).map_or("", String::as_str);
        Self {
            metric: Metric::parse_or_default(get("metric")),
            period: Period::parse_or_default(get("period")),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, organizer: &Organizer) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating analytics...");
        let series = self.period.series();
        if self.output_format == ArgOutputFormat::Json {
            let formatter = Formatter::new(SeriesColumn::ALL.to_vec())
                .with_output_format(self.output_format);
            println!("{}", formatter.format(series));
            return Ok(());
        }

        print_overview(&organizer.overview().await);
        println!();

        println!(
            "📈 {} {}",
            "Sales".bold(),
            format!("({}, {})", self.metric, self.period).dimmed()
        );
        for line in bar_chart(series, self.metric, BAR_WIDTH) {
            println!("  {line}");
        }
        println!();

        print_event_stats();
        println!();
        print_revenue_stats();
        println!();

        let approvals = organizer.approvals().await?;
        let approved = approvals.approved(&STALLS);
        println!("🛍  {}", "Approved stalls".bold());
        if approved.is_empty() {
            println!("  {}", "No stalls approved yet".italic());
        }
        for stall in approved {
            println!("  {} {} · {}", "✓".green(), stall.title, stall.category.dimmed());
        }
        println!();

        println!("💬 {}", "Reviews".bold());
        let formatter = Formatter::new(ReviewColumn::ALL.to_vec());
        println!("{}", formatter.format(&REVIEWS));
        println!();

        print_event_details();
        Ok(())
    }
}

pub fn print_overview(overview: &EventOverview) {
    let status = match overview.status.as_str() {
        "Ongoing" => overview.status.green(),
        "Upcoming" => overview.status.cyan(),
        _ => overview.status.dimmed(),
    };
    println!("🎫 {} [{}]", overview.event_name.bold(), status);
    println!("   {} · {} · {}", overview.date, overview.time, overview.location);
}

/// Horizontal bars scaled to the largest point, one line per point.
pub fn bar_chart(points: &[SeriesPoint], metric: Metric, width: usize) -> Vec<String> {
    let max = points.iter().map(|a| a.value(metric)).max().unwrap_or(0);
    let label_width = points.iter().map(|a| a.label.len()).max().unwrap_or(0);
    points
        .iter()
        .map(|point| {
            let len = match max {
                0 => 0,
                max => (point.value(metric) as usize * width).div_ceil(max as usize),
            };
            format!(
                "{:<label_width$} │{} {}",
                point.label,
                "█".repeat(len),
                point.display(metric)
            )
        })
        .collect()
}

fn print_event_stats() {
    let stats = EVENT_STATS;
    println!("🎟  {}", "Tickets".bold());
    println!(
        "  {} registered · {} available · {}% cancelled",
        stats.registered.to_string().bold(),
        stats.available,
        stats.cancelled_percent
    );
    let demographics: Vec<String> = stats
        .demographics
        .iter()
        .map(|(group, share)| format!("{group} {share}%"))
        .collect();
    println!("  {}", demographics.join(" · ").dimmed());
}

fn print_revenue_stats() {
    let stats = REVENUE_STATS;
    println!(
        "💰 {} {} ({})",
        "Revenue".bold(),
        stats.total_earning.green(),
        stats.ticket_tiers.join(" / ")
    );
    let max = stats.daily.iter().map(|(_, a)| *a).max().unwrap_or(0).max(1);
    let sparks: String = stats
        .daily
        .iter()
        .map(|(_, value)| SPARKS[(*value as usize * (SPARKS.len() - 1)) / max as usize])
        .collect();
    println!("  {sparks}");
}

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn print_event_details() {
    let details = EVENT_DETAILS;
    println!("📌 {}", "Event details".bold());
    println!("  Schedule:  {}", details.schedule);
    println!("  Location:  {}", details.location);
    println!("  Organizer: {}", details.organizer);
    println!("  Category:  {}", details.category);
    println!("  {}", details.description.italic());
    for note in details.notes {
        println!("  • {note}");
    }
}

#[derive(Debug, Clone, Copy)]
enum SeriesColumn {
    Label,
    Revenue,
    Tickets,
}

impl SeriesColumn {
    const ALL: [SeriesColumn; 3] = [
        SeriesColumn::Label,
        SeriesColumn::Revenue,
        SeriesColumn::Tickets,
    ];
}

impl TableColumn<SeriesPoint> for SeriesColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            SeriesColumn::Label => "label",
            SeriesColumn::Revenue => "revenue",
            SeriesColumn::Tickets => "tickets",
        }
        .into()
    }

    fn format<'a>(&self, point: &'a SeriesPoint) -> Cow<'a, str> {
        match self {
            SeriesColumn::Label => point.label.into(),
            SeriesColumn::Revenue => point.display(Metric::Revenue).into(),
            SeriesColumn::Tickets => point.display(Metric::Tickets).into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ReviewColumn {
    Rating,
    Name,
    Text,
    Time,
}

impl ReviewColumn {
    const ALL: [ReviewColumn; 4] = [
        ReviewColumn::Rating,
        ReviewColumn::Name,
        ReviewColumn::Text,
        ReviewColumn::Time,
    ];
}

impl TableColumn<Review> for ReviewColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ReviewColumn::Rating => "Rating",
            ReviewColumn::Name => "Name",
            ReviewColumn::Text => "Review",
            ReviewColumn::Time => "When",
        }
        .into()
    }

    fn format<'a>(&self, review: &'a Review) -> Cow<'a, str> {
        match self {
            ReviewColumn::Rating => stars(review.rating).into(),
            ReviewColumn::Name => review.name.into(),
            ReviewColumn::Text => review.text.into(),
            ReviewColumn::Time => review.time.into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ReviewColumn::Time => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, _review: &Review) -> Option<Color> {
        match self {
            ReviewColumn::Rating => Some(Color::Yellow),
            ReviewColumn::Time => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

fn stars(rating: u8) -> String {
    const MAX: u8 = 5;
    let rating = rating.min(MAX) as usize;
    format!("{}{}", "★".repeat(rating), "☆".repeat(MAX as usize - rating))
}
