//! Data models for caljournal.
//!
//! This module contains the three persisted entity kinds:
//! - [`EventTemplate`] - reusable event definition with time-of-day bounds
//! - [`CalendarEvent`] - an event placed on a concrete date
//! - [`Holiday`] - cached public holiday, keyed by date
//!
//! plus the [`ColorData`] blob shared by templates and events.

pub mod color;
pub mod event;
pub mod holiday;
pub mod template;

pub use color::ColorData;
pub use event::{CalendarEvent, NewCalendarEvent};
pub use holiday::Holiday;
pub use template::{EventTemplate, NewTemplate};

use serde::{Deserialize, Serialize};

/// `HH:mm:ss`, the stored form of template times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// `yyyy-MM-dd`, the holiday primary key format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage form of naive calendar event date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The three entity kinds held by the store.
///
/// Ordering follows the import order: templates, then events, then holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    EventTemplate,
    CalendarEvent,
    Holiday,
}

impl EntityKind {
    /// All kinds, in import order.
    pub const ALL: [Self; 3] = [Self::EventTemplate, Self::CalendarEvent, Self::Holiday];

    /// Top-level key of this kind in a backup document.
    #[must_use]
    pub const fn wire_key(&self) -> &'static str {
        match self {
            Self::EventTemplate => "eventData",
            Self::CalendarEvent => "calendarEventData",
            Self::Holiday => "holidayData",
        }
    }

    /// Backing table name.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::EventTemplate => "event_templates",
            Self::CalendarEvent => "calendar_events",
            Self::Holiday => "holidays",
        }
    }

    /// CLI subcommand noun for this kind.
    #[must_use]
    pub const fn command_noun(&self) -> &'static str {
        match self {
            Self::EventTemplate => "template",
            Self::CalendarEvent => "event",
            Self::Holiday => "holiday",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventTemplate => write!(f, "event template"),
            Self::CalendarEvent => write!(f, "calendar event"),
            Self::Holiday => write!(f, "holiday"),
        }
    }
}

/// Generate a fresh primary key.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().to_uppercase()
}
