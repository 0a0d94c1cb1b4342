//! One-way export of calendar events to an external calendar.
//!
//! The external calendar only sees plain `{title, startDate, endDate,
//! isAllDay}` records; nothing flows back.

use std::io::Write;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::model::CalendarEvent;
use crate::storage::SqliteStorage;

/// An event as handed to an external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkEvent {
    pub title: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_all_day: bool,
}

impl From<&CalendarEvent> for SinkEvent {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            start_date: event.start,
            end_date: event.end,
            is_all_day: event.all_day,
        }
    }
}

/// Destination for exported events.
pub trait CalendarSink {
    /// Deliver a batch of events, returning how many were accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn accept(&mut self, events: &[SinkEvent]) -> Result<usize>;
}

/// Sink writing one JSON object per line.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CalendarSink for JsonlSink<W> {
    fn accept(&mut self, events: &[SinkEvent]) -> Result<usize> {
        for event in events {
            serde_json::to_writer(&mut self.writer, event)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(events.len())
    }
}

/// Send every event that lies entirely within `year`/`month` to `sink`.
///
/// # Errors
///
/// Returns `InvalidArgument` for an impossible month, plus store and sink
/// errors.
pub fn export_month<S: CalendarSink>(
    storage: &SqliteStorage,
    year: i32,
    month: u32,
    sink: &mut S,
) -> Result<usize> {
    let events: Vec<SinkEvent> = storage
        .events_in_month(year, month)?
        .iter()
        .map(SinkEvent::from)
        .collect();
    let accepted = sink.accept(&events)?;
    info!(year, month, accepted, "Exported month to calendar sink");
    Ok(accepted)
}
