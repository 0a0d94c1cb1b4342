//! Cached public holiday.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DATE_FORMAT;

/// A holiday, keyed by its `yyyy-MM-dd` date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: String,
    pub name: String,
}

impl Holiday {
    #[must_use]
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            name: name.into(),
        }
    }

    /// Build from a date string in any padding `%Y-%m-%d` accepts
    /// (`2025-1-1` included), storing the zero-padded key.
    #[must_use]
    pub fn from_date_str(date: &str, name: impl Into<String>) -> Option<Self> {
        let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
        Some(Self::new(parsed, name))
    }

    /// Parsed date, or `None` if the key is not `yyyy-MM-dd`.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}
