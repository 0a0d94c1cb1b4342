//! SQLite storage implementation.
//!
//! This module provides the store adapter for caljournal. Every write goes
//! through [`SqliteStorage::mutate`], which opens an `IMMEDIATE`
//! transaction, runs the closure and commits; an `Err` from the closure
//! drops the transaction and rolls it back.
//!
//! Row writers (`write_template`, `write_calendar_event`, ...) take a plain
//! `&Connection` so they can run either inside a `mutate` closure (a
//! `Transaction` derefs to `Connection`) or grouped under one outer
//! transaction by the importer.

use crate::error::{Error, Result};
use crate::model::{
    CalendarEvent, ColorData, DATETIME_FORMAT, EntityKind, EventTemplate, Holiday,
};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Context for a mutation, tracking how many rows each kind received.
///
/// Passed to mutation closures so the commit can be logged with a
/// per-kind summary.
#[derive(Debug, Default)]
pub struct MutationContext {
    /// Name of the operation being performed.
    pub op_name: String,
    /// Rows written per entity kind.
    pub touched: BTreeMap<EntityKind, usize>,
}

impl MutationContext {
    /// Create a new mutation context.
    #[must_use]
    pub fn new(op_name: &str) -> Self {
        Self {
            op_name: op_name.to_string(),
            touched: BTreeMap::new(),
        }
    }

    /// Record `rows` writes against `kind`.
    pub fn touch(&mut self, kind: EntityKind, rows: usize) {
        *self.touched.entry(kind).or_default() += rows;
    }
}

/// Full copy of the store, one vector per kind.
///
/// Used for before/after comparisons and for export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub templates: Vec<EventTemplate>,
    pub calendar_events: Vec<CalendarEvent>,
    pub holidays: Vec<Holiday>,
}

impl StoreSnapshot {
    /// Returns total number of records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.templates.len() + self.calendar_events.len() + self.holidays.len()
    }
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(timeout_ms.unwrap_or(5000)))?;
        super::schema::apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a mutation inside one write transaction.
    ///
    /// This method:
    /// 1. Begins an IMMEDIATE transaction (for write locking)
    /// 2. Executes the mutation closure
    /// 3. Commits (or rolls back when the closure fails)
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or `StorageUnavailable` if the
    /// transaction cannot begin or commit.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction, &mut MutationContext) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let mut ctx = MutationContext::new(op);
        let result = f(&tx, &mut ctx)?;

        tx.commit()?;
        debug!(op = %ctx.op_name, touched = ?ctx.touched, "Mutation committed");

        Ok(result)
    }

    // ==================
    // Reads
    // ==================

    /// All templates, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_templates(&self) -> Result<Vec<EventTemplate>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEMPLATE_SELECT} ORDER BY sort_order ASC, id ASC"
        ))?;
        let rows = stmt.query_map([], map_template)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// All calendar events, by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_calendar_events(&self) -> Result<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT} ORDER BY start_at ASC, sort_order ASC, id ASC"
        ))?;
        let rows = stmt.query_map([], map_calendar_event)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// All holidays, by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_holidays(&self) -> Result<Vec<Holiday>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, name FROM holidays ORDER BY date ASC")?;
        let rows = stmt.query_map([], map_holiday)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Get a template by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_template(&self, id: &str) -> Result<Option<EventTemplate>> {
        self.conn
            .query_row(
                &format!("{TEMPLATE_SELECT} WHERE id = ?1"),
                [id],
                map_template,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Get a calendar event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_calendar_event(&self, id: &str) -> Result<Option<CalendarEvent>> {
        self.conn
            .query_row(
                &format!("{EVENT_SELECT} WHERE id = ?1"),
                [id],
                map_calendar_event,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Get a holiday by its `yyyy-MM-dd` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_holiday(&self, date: &str) -> Result<Option<Holiday>> {
        self.conn
            .query_row(
                "SELECT date, name FROM holidays WHERE date = ?1",
                [date],
                map_holiday,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Number of stored records of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self, kind: EntityKind) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Read every record of every kind.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            templates: self.get_all_templates()?,
            calendar_events: self.get_all_calendar_events()?,
            holidays: self.get_all_holidays()?,
        })
    }

    // ==================
    // Generic writes
    // ==================

    /// Insert or fully overwrite a template by primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_template(&mut self, template: &EventTemplate) -> Result<()> {
        self.mutate("upsert_template", |tx, ctx| {
            write_template(tx, template)?;
            ctx.touch(EntityKind::EventTemplate, 1);
            Ok(())
        })
    }

    /// Insert or fully overwrite a calendar event by primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_calendar_event(&mut self, event: &CalendarEvent) -> Result<()> {
        self.mutate("upsert_calendar_event", |tx, ctx| {
            write_calendar_event(tx, event)?;
            ctx.touch(EntityKind::CalendarEvent, 1);
            Ok(())
        })
    }

    /// Insert or overwrite a holiday by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_holiday(&mut self, holiday: &Holiday) -> Result<()> {
        self.mutate("upsert_holiday", |tx, ctx| {
            write_holiday(tx, holiday)?;
            ctx.touch(EntityKind::Holiday, 1);
            Ok(())
        })
    }

    /// Delete every record of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all(&mut self, kind: EntityKind) -> Result<usize> {
        self.mutate("delete_all", |tx, ctx| {
            let removed = delete_all_in(tx, kind)?;
            ctx.touch(kind, removed);
            Ok(removed)
        })
    }
}

// ==================
// Row writers
// ==================

pub(crate) const TEMPLATE_SELECT: &str = "SELECT id, title, start_time, end_time, memo, all_day, color, sort_order
     FROM event_templates";

pub(crate) const EVENT_SELECT: &str = "SELECT id, title, start_at, end_at, memo, all_day, color, sort_order
     FROM calendar_events";

/// Upsert a template row by primary key, overwriting every field.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn write_template(conn: &Connection, template: &EventTemplate) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO event_templates (id, title, start_time, end_time, memo, all_day, color, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
           title = excluded.title,
           start_time = excluded.start_time,
           end_time = excluded.end_time,
           memo = excluded.memo,
           all_day = excluded.all_day,
           color = excluded.color,
           sort_order = excluded.sort_order",
        rusqlite::params![
            template.id,
            template.title,
            template.start_time,
            template.end_time,
            template.memo,
            template.all_day,
            template.color.as_ref().map(ColorData::as_bytes),
            template.sort_order,
        ],
    )?;
    Ok(())
}

/// Upsert a calendar event row by primary key, overwriting every field.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn write_calendar_event(conn: &Connection, event: &CalendarEvent) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO calendar_events (id, title, start_at, end_at, memo, all_day, color, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
           title = excluded.title,
           start_at = excluded.start_at,
           end_at = excluded.end_at,
           memo = excluded.memo,
           all_day = excluded.all_day,
           color = excluded.color,
           sort_order = excluded.sort_order",
        rusqlite::params![
            event.id,
            event.title,
            format_datetime(event.start),
            format_datetime(event.end),
            event.memo,
            event.all_day,
            event.color.as_ref().map(ColorData::as_bytes),
            event.sort_order,
        ],
    )?;
    Ok(())
}

/// Upsert a holiday row by date.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn write_holiday(conn: &Connection, holiday: &Holiday) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO holidays (date, name) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET name = excluded.name",
        rusqlite::params![holiday.date, holiday.name],
    )?;
    Ok(())
}

/// Delete every row of one kind, returning the number removed.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn delete_all_in(conn: &Connection, kind: EntityKind) -> rusqlite::Result<usize> {
    conn.execute(&format!("DELETE FROM {}", kind.table()), [])
}

// ==================
// Row mapping
// ==================

/// Storage text for a naive date-time.
#[must_use]
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let text: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn color_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<ColorData>> {
    let bytes: Option<Vec<u8>> = row.get(idx)?;
    Ok(bytes.and_then(ColorData::from_bytes))
}

pub(crate) fn map_template(row: &Row<'_>) -> rusqlite::Result<EventTemplate> {
    Ok(EventTemplate {
        id: row.get(0)?,
        title: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        memo: row.get(4)?,
        all_day: row.get(5)?,
        color: color_column(row, 6)?,
        sort_order: row.get(7)?,
    })
}

pub(crate) fn map_calendar_event(row: &Row<'_>) -> rusqlite::Result<CalendarEvent> {
    Ok(CalendarEvent {
        id: row.get(0)?,
        title: row.get(1)?,
        start: parse_datetime_column(row, 2)?,
        end: parse_datetime_column(row, 3)?,
        memo: row.get(4)?,
        all_day: row.get(5)?,
        color: color_column(row, 6)?,
        sort_order: row.get(7)?,
    })
}

fn map_holiday(row: &Row<'_>) -> rusqlite::Result<Holiday> {
    Ok(Holiday {
        date: row.get(0)?,
        name: row.get(1)?,
    })
}
