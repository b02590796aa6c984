// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Static datasets shown by the organizer pages.

use std::fmt::{self, Display};
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;

/// A vendor booth that can be approved for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stall {
    pub title: &'static str,
    pub category: &'static str,
}

pub static STALLS: [Stall; 6] = [
    Stall { title: "Twinkle Tales", category: "Accessories" },
    Stall { title: "Taste Town", category: "Food" },
    Stall { title: "Handmade Haven", category: "Crafts" },
    Stall { title: "Melody Makers", category: "Live Music" },
    Stall { title: "Fun Zone", category: "Gaming" },
    Stall { title: "LEGENDS of hip-Hop", category: "Music" },
];

/// Tagline shown on every stall detail panel.
pub const STALL_SUBTITLE: &str = "Where Style Meets Sparkle";

/// Something sold at a stall, priced in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallItem {
    pub name: &'static str,
    pub price: u32,
}

pub static STALL_ITEMS: [StallItem; 8] = [
    StallItem { name: "Chains", price: 150 },
    StallItem { name: "Bows", price: 80 },
    StallItem { name: "Bracelets", price: 50 },
    StallItem { name: "Claw clips", price: 60 },
    StallItem { name: "Scrunchies", price: 40 },
    StallItem { name: "Earrings", price: 120 },
    StallItem { name: "Rings", price: 90 },
    StallItem { name: "Necklaces", price: 200 },
];

/// Picks three to five distinct catalogue items for a stall detail panel.
pub fn random_items<R: Rng + ?Sized>(rng: &mut R) -> Vec<StallItem> {
    let count = rng.random_range(3..=5);
    STALL_ITEMS.choose_multiple(rng, count).copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artist {
    pub name: &'static str,
    pub role: &'static str,
}

pub static ARTISTS: [Artist; 8] = [
    Artist { name: "Taylor Swift", role: "Singer" },
    Artist { name: "Rihanna", role: "Singer" },
    Artist { name: "Lady Gaga", role: "Singer" },
    Artist { name: "Ed Sheeran", role: "Singer" },
    Artist { name: "Dua Lipa", role: "Singer" },
    Artist { name: "Adele", role: "Singer" },
    Artist { name: "Olivia Rodrigo", role: "Singer" },
    Artist { name: "Pitbull", role: "Rapper" },
];

/// An artist's request for someone to host their event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtistRequest {
    pub title: &'static str,
    pub interest: u32,
    pub tag: &'static str,
    pub month: &'static str,
    pub location: &'static str,
    pub about: &'static str,
}

pub static ARTIST_REQUESTS: [ArtistRequest; 3] = [
    ArtistRequest {
        title: "Art and Music Collaboration at beach",
        interest: 110,
        tag: "Fest and Gathering",
        month: "June",
        location: "Novotel",
        about: "Get ready for an electrifying night filled with powerful performances and soul-stirring melodies. From heart-thumping beats to soothing harmonies, this concert promises a musical journey like no other.",
    },
    ArtistRequest {
        title: "Beach Music Night",
        interest: 220,
        tag: "Popular",
        month: "July",
        location: "Beach Arena",
        about: "An open-air music celebration featuring live bands and DJs.",
    },
    ArtistRequest {
        title: "Art Expo 2025",
        interest: 90,
        tag: "Trending",
        month: "August",
        location: "Vizag",
        about: "A creative gathering of artists and performers from across the country.",
    },
];

/// Lifecycle state of a managed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Ongoing,
    Upcoming,
    Past,
}

const STATUS_ONGOING: &str = "Ongoing";
const STATUS_UPCOMING: &str = "Upcoming";
const STATUS_PAST: &str = "Past";

impl AsRef<str> for EventStatus {
    fn as_ref(&self) -> &str {
        match self {
            EventStatus::Ongoing => STATUS_ONGOING,
            EventStatus::Upcoming => STATUS_UPCOMING,
            EventStatus::Past => STATUS_PAST,
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ONGOING => Ok(EventStatus::Ongoing),
            STATUS_UPCOMING => Ok(EventStatus::Upcoming),
            STATUS_PAST => Ok(EventStatus::Past),
            _ => Err(()),
        }
    }
}

/// What the row button of a managed event does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Reopen the event in the wizard.
    Edit,
    /// Start a new event from this one, without its schedule.
    Repeat,
}

impl Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Edit => write!(f, "Edit"),
            RowAction::Repeat => write!(f, "Repeat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedEvent {
    pub date: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub status: EventStatus,
}

impl ManagedEvent {
    pub fn action(&self) -> RowAction {
        match self.status {
            EventStatus::Past => RowAction::Repeat,
            EventStatus::Ongoing | EventStatus::Upcoming => RowAction::Edit,
        }
    }
}

const fn managed(
    date: &'static str,
    name: &'static str,
    category: &'static str,
    status: EventStatus,
) -> ManagedEvent {
    ManagedEvent {
        date,
        name,
        category,
        status,
    }
}

/// The "All Events" table, split in its two pages.
pub static MANAGED_EVENT_PAGES: [&[ManagedEvent]; 2] = [
    &[
        managed("May 3, 2025", "Elyzium Band Live", "Entertainment", EventStatus::Ongoing),
        managed(
            "May 14–16, 2025",
            "Bharat Marine Systems 2025",
            "Defense",
            EventStatus::Upcoming,
        ),
        managed(
            "May 14–16, 2025",
            "GeoSpace Bharat 2025",
            "Technology",
            EventStatus::Upcoming,
        ),
        managed(
            "May 14–16, 2025",
            "SwaRaksha Mahotsav 2025",
            "Public Safety",
            EventStatus::Upcoming,
        ),
        managed(
            "May 14–16, 2025",
            "Drone Shaurya Global Summit & Expo",
            "Technology",
            EventStatus::Upcoming,
        ),
    ],
    &[
        managed("March 21, 2025", "MARITZA CORREA Vizag", "Music Concert", EventStatus::Past),
        managed("March 21, 2025", "MARITZA CORREA Vizag", "Music Concert", EventStatus::Past),
        managed("March 21, 2025", "MARITZA CORREA Vizag", "Music Concert", EventStatus::Past),
    ],
];

/// The featured upcoming event on the dashboard and management pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingHighlight {
    pub name: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub category: &'static str,
    pub venue: &'static str,
    pub about: &'static str,
    pub highlight: &'static str,
    pub stats: [(&'static str, &'static str); 4],
}

pub const UPCOMING_HIGHLIGHT: UpcomingHighlight = UpcomingHighlight {
    name: "MARITZA CORREA Vizag",
    date: "Wednesday, 28 May 2025",
    time: "4:15 - 8:30 PM",
    category: "Music Concert",
    venue: "Qubaa (Vizag)",
    about: "Get ready for an electrifying musical transformation as we dive into the world of heavyweight music!",
    highlight: "One of the sensational USA maestros @djmaritzacorrea who has set hearts racing with her mind-blowing performance.",
    stats: [
        ("Event Registrations", "375"),
        ("Total Revenue", "₹10,00,000"),
        ("Ad Ons", "20"),
        ("Date Change", "45"),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

/// A headline number on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub direction: TrendDirection,
    pub percentage: &'static str,
    pub comparison: &'static str,
}

pub static STAT_CARDS: [StatCard; 4] = [
    StatCard {
        label: "Total Participants",
        value: "2,420",
        direction: TrendDirection::Up,
        percentage: "40%",
        comparison: "vs last month",
    },
    StatCard {
        label: "Total events",
        value: "85",
        direction: TrendDirection::Down,
        percentage: "10%",
        comparison: "vs last month",
    },
    StatCard {
        label: "Total Revenue",
        value: "₹4,75,000",
        direction: TrendDirection::Up,
        percentage: "20%",
        comparison: "vs last year",
    },
    StatCard {
        label: "Average Rating",
        value: "4.8",
        direction: TrendDirection::Up,
        percentage: "25%",
        comparison: "vs last month",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Review {
    pub name: &'static str,
    pub rating: u8,
    pub text: &'static str,
    pub time: &'static str,
}

pub static REVIEWS: [Review; 4] = [
    Review {
        name: "Riya Mehta",
        rating: 5,
        text: "An unforgettable evening! The organization was flawless, from entry to exit, everything ran smoothly. The sound and lights were just WOW!",
        time: "18 minutes ago",
    },
    Review {
        name: "Rahul Deshmukh",
        rating: 5,
        text: "Enjoyed every bit of the music and lights. Slight delays in the schedule, but overall, a fantastic night",
        time: "18 minutes ago",
    },
    Review {
        name: "Sanya Kapoor",
        rating: 4,
        text: "Great vibes and amazing performances. The crowd management could have been better though.",
        time: "2 hours ago",
    },
    Review {
        name: "Amit Patel",
        rating: 5,
        text: "Absolutely loved it! Can't wait for the next event.",
        time: "1 day ago",
    },
];

/// Attendance marked on the review calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarHighlight {
    /// ISO date.
    pub date: &'static str,
    pub count: u32,
    pub color: &'static str,
}

pub static CALENDAR_HIGHLIGHTS: [CalendarHighlight; 7] = [
    CalendarHighlight { date: "2025-01-10", count: 20, color: "pink" },
    CalendarHighlight { date: "2025-01-13", count: 100, color: "green" },
    CalendarHighlight { date: "2025-01-14", count: 52, color: "yellow" },
    CalendarHighlight { date: "2025-01-15", count: 17, color: "pink" },
    CalendarHighlight { date: "2025-01-19", count: 31, color: "pink" },
    CalendarHighlight { date: "2025-01-20", count: 83, color: "yellow" },
    CalendarHighlight { date: "2025-01-27", count: 145, color: "green" },
];

/// Ticket figures of the event shown on the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStats {
    pub registered: u32,
    pub available: u32,
    pub demographics: [(&'static str, u32); 3],
    /// Share of cancelled tickets, in percent.
    pub cancelled_percent: u32,
}

pub const EVENT_STATS: EventStats = EventStats {
    registered: 375,
    available: 25,
    demographics: [("Male", 50), ("Female", 30), ("Other", 10)],
    cancelled_percent: 12,
};

/// Earnings of the VIP ticket tier over two weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueStats {
    pub total_earning: &'static str,
    pub ticket_tiers: [&'static str; 4],
    pub daily: [(&'static str, u32); 15],
}

pub const REVENUE_STATS: RevenueStats = RevenueStats {
    total_earning: "₹10,800.80",
    ticket_tiers: ["VIP", "Regular", "Child", "Family"],
    daily: [
        ("Mon", 900),
        ("Tue", 1500),
        ("Wed", 1300),
        ("Thu", 3000),
        ("Fri", 1700),
        ("Sat", 2500),
        ("Sun", 1300),
        ("Mon", 2700),
        ("Tue", 1600),
        ("Wed", 3100),
        ("Thu", 2200),
        ("Fri", 2900),
        ("Sat", 2100),
        ("Sun", 900),
        ("Mon", 500),
    ],
};

/// Long-form details of the event shown on the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDetails {
    pub schedule: &'static str,
    pub location: &'static str,
    pub organizer: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub notes: [&'static str; 4],
}

pub const EVENT_DETAILS: EventDetails = EventDetails {
    schedule: "March 22, 2025; 7:00 PM onwards",
    location: "VMRDA Grounds, Visakhapatnam",
    organizer: "Moonlight Events",
    category: "Music Concert",
    description: "A sensational live performance by Maritza Correa, bringing Latin pop and soul to the heart of Vizag. Enjoy an electrifying evening filled with vibrant music, food stalls, light shows, and crowd interaction. This open-air concert is a must-attend for music lovers and cultural enthusiasts.",
    notes: [
        "Entry starts at 6:00 PM.",
        "All age groups welcome.",
        "Food & beverage stalls available.",
        "Security and medical assistance will be on-site.",
    ],
};

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn random_items_are_distinct_catalogue_entries() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let items = random_items(&mut rng);
            assert!((3..=5).contains(&items.len()), "{}", items.len());
            for item in &items {
                assert!(STALL_ITEMS.contains(item));
                assert_eq!(items.iter().filter(|a| a.name == item.name).count(), 1);
            }
        }
    }

    #[test]
    fn past_events_are_repeated_others_edited() {
        let [first, second] = MANAGED_EVENT_PAGES;
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|a| a.action() == RowAction::Edit));
        assert_eq!(second.len(), 3);
        assert!(second.iter().all(|a| a.action() == RowAction::Repeat));
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [EventStatus::Ongoing, EventStatus::Upcoming, EventStatus::Past] {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
        assert_eq!("Cancelled".parse::<EventStatus>(), Err(()));
    }
}
