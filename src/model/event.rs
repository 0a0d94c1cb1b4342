//! Calendar event model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ColorData;
use crate::error::{Error, Result};

/// An event placed on the calendar.
///
/// `start` / `end` are wall-clock values with no timezone attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub memo: Option<String>,
    pub all_day: bool,
    pub color: Option<ColorData>,
    pub sort_order: i64,
}

/// Input for creating or editing a calendar event.
#[derive(Debug, Clone)]
pub struct NewCalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub memo: Option<String>,
    pub all_day: bool,
    pub color: Option<ColorData>,
    pub sort_order: i64,
}

impl NewCalendarEvent {
    /// Check creation-time invariants: non-empty title, end after start.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidArgument("title must not be empty".into()));
        }
        if self.end <= self.start {
            return Err(Error::InvalidArgument(format!(
                "end {} must be after start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}
