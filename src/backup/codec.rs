//! Entity ↔ wire record conversion.
//!
//! Encoding is total. Decoding works on raw [`serde_json::Value`] records so
//! that a single bad field can be handled per record instead of failing the
//! whole document:
//!
//! - `""` memo and `""` color decode as absent
//! - absent `allDay` is `false`, absent `sortOrder` is `0`
//! - an unreadable calendar event date falls back to the stored record's
//!   value, then to [`DecodeDefaults`]; with neither the record is rejected

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{CalendarEventRecord, DecodeDefaults, HolidayRecord, TemplateRecord};
use crate::model::{CalendarEvent, ColorData, EventTemplate, Holiday, color::encode_optional};

/// Why a single wire record could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `colorData` is not valid base64: {0}")]
    InvalidColor(String),

    #[error("field `{field}` has unreadable date '{value}' and no fallback")]
    InvalidDate { field: &'static str, value: String },
}

/// Time zone that places stored wall-clock values on the timeline.
///
/// `Local` and `Named` resolve the offset for each value, so a July event
/// keeps its summer offset no matter when the backup is written or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The host's zone.
    Local,
    /// An IANA zone such as `America/New_York`.
    Named(Tz),
    /// One offset for every value.
    Fixed(FixedOffset),
}

impl Zone {
    fn to_instant(self, value: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Self::Local => place(&Local, value),
            Self::Named(tz) => place(&tz, value),
            Self::Fixed(offset) => place(&offset, value),
        }
    }

    fn to_wall_clock(self, instant: &DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Named(tz) => instant.with_timezone(&tz).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Attach the zone's offset in effect at `value`.
///
/// A repeated wall-clock time takes the earlier instant. A time skipped by
/// a forward transition keeps the offset from before the gap.
fn place<Z: TimeZone>(zone: &Z, value: NaiveDateTime) -> DateTime<FixedOffset> {
    match zone.from_local_datetime(&value) {
        LocalResult::Single(dt) => dt.fixed_offset(),
        LocalResult::Ambiguous(a, b) => {
            if a <= b {
                a.fixed_offset()
            } else {
                b.fixed_offset()
            }
        }
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(&value).fix();
            offset
                .from_local_datetime(&value)
                .single()
                .unwrap_or_else(|| value.and_utc().fixed_offset())
        }
    }
}

/// Converts between stored entities and backup records.
///
/// Calendar event date-times are written as RFC 3339 with the offset the
/// codec's [`Zone`] has at that date (UTC renders with a `Z` suffix).
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    zone: Zone,
}

impl Default for Codec {
    fn default() -> Self {
        Self::utc()
    }
}

impl Codec {
    #[must_use]
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    /// Codec that reads and writes wall-clock times as UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Zone::Fixed(Utc.fix()))
    }

    /// Codec in the host's time zone.
    #[must_use]
    pub fn local() -> Self {
        Self::new(Zone::Local)
    }

    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self::new(Zone::Fixed(offset))
    }

    #[must_use]
    pub fn in_zone(tz: Tz) -> Self {
        Self::new(Zone::Named(tz))
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    // ==================
    // Encoding
    // ==================

    /// Render a naive wall-clock value as RFC 3339 in this codec's zone.
    #[must_use]
    pub fn encode_datetime(&self, value: NaiveDateTime) -> String {
        self.zone
            .to_instant(value)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    #[must_use]
    pub fn encode_template(&self, template: &EventTemplate) -> TemplateRecord {
        TemplateRecord {
            id: template.id.clone(),
            event_title: template.title.clone(),
            event_start_date: template.start_time.clone(),
            event_end_date: template.end_time.clone(),
            event_memo: template.memo.clone().unwrap_or_default(),
            all_day: template.all_day,
            color_data: encode_optional(template.color.as_ref()),
            sort_order: template.sort_order,
        }
    }

    #[must_use]
    pub fn encode_calendar_event(&self, event: &CalendarEvent) -> CalendarEventRecord {
        CalendarEventRecord {
            id: event.id.clone(),
            event_title: event.title.clone(),
            event_start_date: self.encode_datetime(event.start),
            event_end_date: self.encode_datetime(event.end),
            event_memo: event.memo.clone().unwrap_or_default(),
            all_day: event.all_day,
            color_data: encode_optional(event.color.as_ref()),
            sort_order: event.sort_order,
        }
    }

    #[must_use]
    pub fn encode_holiday(&self, holiday: &Holiday) -> HolidayRecord {
        HolidayRecord {
            date: holiday.date.clone(),
            name: holiday.name.clone(),
        }
    }

    // ==================
    // Decoding
    // ==================

    /// Parse an RFC 3339 string into this codec's wall clock.
    ///
    /// Sub-second precision is dropped, matching what encoding writes.
    #[must_use]
    pub fn decode_datetime(&self, text: &str) -> Option<NaiveDateTime> {
        let parsed = DateTime::parse_from_rfc3339(text).ok()?;
        self.zone.to_wall_clock(&parsed).with_nanosecond(0)
    }

    /// Decode a template record. Times are copied verbatim.
    ///
    /// # Errors
    ///
    /// Returns the first field problem found.
    pub fn decode_template(&self, value: &Value) -> Result<EventTemplate, DecodeError> {
        let obj = as_object(value)?;
        Ok(EventTemplate {
            id: required_id(obj)?,
            title: required_str(obj, "eventTitle")?.to_string(),
            start_time: required_str(obj, "eventStartDate")?.to_string(),
            end_time: required_str(obj, "eventEndDate")?.to_string(),
            memo: optional_memo(obj)?,
            all_day: optional_bool(obj, "allDay")?,
            color: optional_color(obj)?,
            sort_order: optional_i64(obj, "sortOrder")?,
        })
    }

    /// Decode a calendar event record.
    ///
    /// `existing` is the stored record with the same id, if any; its dates
    /// are used when the record's own dates cannot be read.
    ///
    /// # Errors
    ///
    /// Returns the first field problem found.
    pub fn decode_calendar_event(
        &self,
        value: &Value,
        existing: Option<&CalendarEvent>,
        defaults: &DecodeDefaults,
    ) -> Result<CalendarEvent, DecodeError> {
        let obj = as_object(value)?;
        let start = self.decode_date_field(
            obj,
            "eventStartDate",
            existing.map(|e| e.start).or(defaults.start),
        )?;
        let end = self.decode_date_field(
            obj,
            "eventEndDate",
            existing.map(|e| e.end).or(defaults.end),
        )?;

        Ok(CalendarEvent {
            id: required_id(obj)?,
            title: required_str(obj, "eventTitle")?.to_string(),
            start,
            end,
            memo: optional_memo(obj)?,
            all_day: optional_bool(obj, "allDay")?,
            color: optional_color(obj)?,
            sort_order: optional_i64(obj, "sortOrder")?,
        })
    }

    /// Decode a holiday record. The stored key is always zero-padded
    /// `yyyy-MM-dd`, whatever padding the record used.
    ///
    /// # Errors
    ///
    /// Returns the first field problem found.
    pub fn decode_holiday(&self, value: &Value) -> Result<Holiday, DecodeError> {
        let obj = as_object(value)?;
        let date = required_str(obj, "date")?;
        let name = required_str(obj, "name")?;
        Holiday::from_date_str(date, name).ok_or_else(|| DecodeError::InvalidDate {
            field: "date",
            value: date.to_string(),
        })
    }

    fn decode_date_field(
        &self,
        obj: &Map<String, Value>,
        field: &'static str,
        fallback: Option<NaiveDateTime>,
    ) -> Result<NaiveDateTime, DecodeError> {
        let text = optional_str(obj, field)?.unwrap_or_default();
        self.decode_datetime(text)
            .or(fallback)
            .ok_or_else(|| DecodeError::InvalidDate {
                field,
                value: text.to_string(),
            })
    }
}

/// The `id` of a raw record, if it has a string one.
#[must_use]
pub fn record_id(value: &Value) -> Option<String> {
    value.get("id").and_then(Value::as_str).map(str::to_string)
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::NotAnObject)
}

fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DecodeError> {
    optional_str(obj, field)?.ok_or(DecodeError::MissingField(field))
}

fn required_id(obj: &Map<String, Value>) -> Result<String, DecodeError> {
    match required_str(obj, "id")? {
        "" => Err(DecodeError::MissingField("id")),
        id => Ok(id.to_string()),
    }
}

fn optional_memo(obj: &Map<String, Value>) -> Result<Option<String>, DecodeError> {
    Ok(optional_str(obj, "eventMemo")?
        .filter(|memo| !memo.is_empty())
        .map(str::to_string))
}

fn optional_color(obj: &Map<String, Value>) -> Result<Option<ColorData>, DecodeError> {
    let text = optional_str(obj, "colorData")?.unwrap_or_default();
    ColorData::from_base64(text).map_err(|e| DecodeError::InvalidColor(e.to_string()))
}

fn optional_bool(obj: &Map<String, Value>, field: &'static str) -> Result<bool, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "a boolean",
        }),
    }
}

fn optional_i64(obj: &Map<String, Value>, field: &'static str) -> Result<i64, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value.as_i64().ok_or(DecodeError::WrongType {
            field,
            expected: "an integer",
        }),
    }
}
