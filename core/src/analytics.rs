// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fixtures::ManagedEvent;
use crate::storage::{ANALYTICS_EVENT_DATA, LocalStorage};

/// Quantity plotted by the analytics chart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    #[default]
    Revenue,
    Tickets,
}

const METRIC_REVENUE: &str = "revenue";
const METRIC_TICKETS: &str = "tickets";

impl Metric {
    /// Parses a metric, falling back to revenue for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl AsRef<str> for Metric {
    fn as_ref(&self) -> &str {
        match self {
            Metric::Revenue => METRIC_REVENUE,
            Metric::Tickets => METRIC_TICKETS,
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Metric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            METRIC_REVENUE => Ok(Metric::Revenue),
            METRIC_TICKETS => Ok(Metric::Tickets),
            _ => Err(()),
        }
    }
}

/// Bucket size of the analytics chart.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

const PERIOD_WEEKLY: &str = "weekly";
const PERIOD_MONTHLY: &str = "monthly";
const PERIOD_YEARLY: &str = "yearly";

impl Period {
    /// Parses a period, falling back to monthly for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn series(self) -> &'static [SeriesPoint] {
        match self {
            Period::Weekly => &WEEKLY,
            Period::Monthly => &MONTHLY,
            Period::Yearly => &YEARLY,
        }
    }
}

impl AsRef<str> for Period {
    fn as_ref(&self) -> &str {
        match self {
            Period::Weekly => PERIOD_WEEKLY,
            Period::Monthly => PERIOD_MONTHLY,
            Period::Yearly => PERIOD_YEARLY,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Period {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PERIOD_WEEKLY => Ok(Period::Weekly),
            PERIOD_MONTHLY => Ok(Period::Monthly),
            PERIOD_YEARLY => Ok(Period::Yearly),
            _ => Err(()),
        }
    }
}

/// One bar of the analytics chart. Revenue is in thousands of rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub revenue: u32,
    pub tickets: u32,
}

impl SeriesPoint {
    pub fn value(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::Tickets => self.tickets,
        }
    }

    /// Display text of the point, e.g. `₹40000` or `450`.
    pub fn display(&self, metric: Metric) -> String {
        format_value(metric, self.value(metric))
    }
}

pub fn format_value(metric: Metric, value: u32) -> String {
    match metric {
        Metric::Revenue => format!("₹{}", u64::from(value) * 1000),
        Metric::Tickets => value.to_string(),
    }
}

const fn point(label: &'static str, revenue: u32, tickets: u32) -> SeriesPoint {
    SeriesPoint {
        label,
        revenue,
        tickets,
    }
}

const WEEKLY: [SeriesPoint; 7] = [
    point("Mon", 5, 50),
    point("Tue", 8, 80),
    point("Wed", 12, 120),
    point("Thu", 10, 100),
    point("Fri", 20, 200),
    point("Sat", 35, 350),
    point("Sun", 30, 300),
];

const MONTHLY: [SeriesPoint; 12] = [
    point("Jan", 10, 150),
    point("Feb", 15, 220),
    point("Mar", 40, 450),
    point("Apr", 45, 500),
    point("May", 35, 380),
    point("Jun", 30, 320),
    point("Jul", 60, 650),
    point("Aug", 55, 590),
    point("Sep", 50, 540),
    point("Oct", 65, 700),
    point("Nov", 70, 750),
    point("Dec", 80, 850),
];

const YEARLY: [SeriesPoint; 5] = [
    point("2021", 150, 1500),
    point("2022", 200, 2200),
    point("2023", 350, 3800),
    point("2024", 450, 4900),
    point("2025", 500, 5500),
];

/// Minimal event record handed from the management page to the analytics page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsProjection {
    pub event_name: String,
    pub date: String,
    pub category: String,
    pub status: String,
}

impl From<&ManagedEvent> for AnalyticsProjection {
    fn from(event: &ManagedEvent) -> Self {
        Self {
            event_name: event.name.to_string(),
            date: event.date.to_string(),
            category: event.category.to_string(),
            status: event.status.to_string(),
        }
    }
}

impl AnalyticsProjection {
    /// Stores the projection for the analytics page to pick up.
    pub async fn record(&self, storage: &dyn LocalStorage) -> Result<(), Error> {
        tracing::debug!(event = %self.event_name, "recording analytics projection");
        let value = serde_json::to_string(self)?;
        storage.set(ANALYTICS_EVENT_DATA, &value).await
    }
}

/// Header of the analytics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOverview {
    pub event_name: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub location: String,
}

impl Default for EventOverview {
    fn default() -> Self {
        Self {
            event_name: "Martiza Concert Vizag".to_string(),
            date: "25 June 2025".to_string(),
            time: "12:00 PM".to_string(),
            status: "Past".to_string(),
            location: "Visakhapatnam".to_string(),
        }
    }
}

impl EventOverview {
    /// The default overview with the stored projection laid over it.
    ///
    /// Empty or missing stored values keep the default; an unreadable
    /// projection is logged and ignored.
    pub async fn load(storage: &dyn LocalStorage) -> Self {
        let mut overview = Self::default();
        let raw = match storage.get(ANALYTICS_EVENT_DATA).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return overview,
            Err(err) => {
                tracing::warn!(%err, "failed to read analytics event data");
                return overview;
            }
        };

        match serde_json::from_str::<AnalyticsProjection>(&raw) {
            Ok(projection) => overview.merge(projection),
            Err(err) => tracing::warn!(%err, "failed to parse analytics event data"),
        }
        overview
    }

    fn merge(&mut self, projection: AnalyticsProjection) {
        let overlay = |slot: &mut String, value: String| {
            if !value.is_empty() {
                *slot = value;
            }
        };
        overlay(&mut self.event_name, projection.event_name);
        overlay(&mut self.date, projection.date);
        overlay(&mut self.status, projection.status);
    }
}
