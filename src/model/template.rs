//! Event template model.
//!
//! Templates hold a time-of-day range without a date. Applying a template
//! to calendar dates materializes one [`CalendarEvent`](super::CalendarEvent)
//! per date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ColorData, TIME_FORMAT};
use crate::error::{Error, Result};

/// A persisted event template.
///
/// `start_time` / `end_time` are kept as the literal `HH:mm:ss` strings they
/// were stored with; imports copy them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub memo: Option<String>,
    pub all_day: bool,
    pub color: Option<ColorData>,
    pub sort_order: i64,
}

impl EventTemplate {
    /// Parsed start time, if the stored string is a valid time of day.
    #[must_use]
    pub fn start(&self) -> Option<NaiveTime> {
        parse_time(&self.start_time)
    }

    /// Parsed end time, if the stored string is a valid time of day.
    #[must_use]
    pub fn end(&self) -> Option<NaiveTime> {
        parse_time(&self.end_time)
    }

    /// Combine the template's times with a calendar date.
    #[must_use]
    pub fn materialize_on(&self, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((date.and_time(self.start()?), date.and_time(self.end()?)))
    }
}

/// Input for creating or editing a template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub title: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub memo: Option<String>,
    pub all_day: bool,
    pub color: Option<ColorData>,
}

impl NewTemplate {
    /// Check creation-time invariants: non-empty title, end after start.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidArgument("title must not be empty".into()));
        }
        if self.end_time <= self.start_time {
            return Err(Error::InvalidArgument(format!(
                "end time {} must be after start time {}",
                self.end_time.format(TIME_FORMAT),
                self.start_time.format(TIME_FORMAT)
            )));
        }
        Ok(())
    }

    /// Memo with blank text collapsed to `None`.
    #[must_use]
    pub fn normalized_memo(&self) -> Option<String> {
        self.memo.clone().filter(|m| !m.is_empty())
    }
}

/// Parse a time of day as `HH:mm:ss`, falling back to `HH:mm`.
#[must_use]
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}
