//! Day-to-day journal operations: templates, calendar events, holidays.
//!
//! Every write runs inside [`SqliteStorage::mutate`], so duplicate checks
//! and the insert that follows them see the same snapshot.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use super::sqlite::{
    EVENT_SELECT, SqliteStorage, TEMPLATE_SELECT, format_datetime, map_calendar_event,
    map_template, write_calendar_event, write_template,
};
use crate::error::{Error, Result};
use crate::model::{
    CalendarEvent, ColorData, DATE_FORMAT, EntityKind, EventTemplate, Holiday, NewCalendarEvent,
    NewTemplate, TIME_FORMAT, new_id,
};

/// A date that was not materialized because an identical event exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateConflict {
    pub date: NaiveDate,
    pub existing_id: String,
}

/// Result of applying a template to a list of dates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyOutcome {
    pub created: Vec<CalendarEvent>,
    pub conflicts: Vec<DuplicateConflict>,
}

impl SqliteStorage {
    // ==================
    // Templates
    // ==================

    /// Create a template at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank title or inverted times and
    /// `DuplicateRecord` when an identical template exists.
    pub fn create_template(&mut self, input: &NewTemplate) -> Result<EventTemplate> {
        input.validate()?;
        let start_time = input.start_time.format(TIME_FORMAT).to_string();
        let end_time = input.end_time.format(TIME_FORMAT).to_string();

        self.mutate("create_template", |tx, ctx| {
            if let Some(existing_id) = find_duplicate_template(
                tx,
                &input.title,
                &start_time,
                &end_time,
                input.color.as_ref(),
                None,
            )? {
                return Err(Error::DuplicateRecord {
                    kind: EntityKind::EventTemplate,
                    existing_id,
                    title: input.title.clone(),
                });
            }

            let sort_order: i64 =
                tx.query_row("SELECT COUNT(*) FROM event_templates", [], |row| row.get(0))?;
            let template = EventTemplate {
                id: new_id(),
                title: input.title.clone(),
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                memo: input.normalized_memo(),
                all_day: input.all_day,
                color: input.color.clone(),
                sort_order,
            };
            write_template(tx, &template)?;
            ctx.touch(EntityKind::EventTemplate, 1);
            Ok(template)
        })
    }

    /// Edit a template in place, keeping its id and sort order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, plus the errors of
    /// [`create_template`](Self::create_template).
    pub fn update_template(&mut self, id: &str, input: &NewTemplate) -> Result<EventTemplate> {
        input.validate()?;
        let start_time = input.start_time.format(TIME_FORMAT).to_string();
        let end_time = input.end_time.format(TIME_FORMAT).to_string();

        self.mutate("update_template", |tx, ctx| {
            let existing = tx
                .query_row(
                    &format!("{TEMPLATE_SELECT} WHERE id = ?1"),
                    [id],
                    map_template,
                )
                .optional()?
                .ok_or_else(|| Error::NotFound {
                    kind: EntityKind::EventTemplate,
                    id: id.to_string(),
                })?;

            if let Some(existing_id) = find_duplicate_template(
                tx,
                &input.title,
                &start_time,
                &end_time,
                input.color.as_ref(),
                Some(id),
            )? {
                return Err(Error::DuplicateRecord {
                    kind: EntityKind::EventTemplate,
                    existing_id,
                    title: input.title.clone(),
                });
            }

            let template = EventTemplate {
                id: existing.id,
                title: input.title.clone(),
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                memo: input.normalized_memo(),
                all_day: input.all_day,
                color: input.color.clone(),
                sort_order: existing.sort_order,
            };
            write_template(tx, &template)?;
            ctx.touch(EntityKind::EventTemplate, 1);
            Ok(template)
        })
    }

    /// Delete a template.
    ///
    /// Events already materialized from it are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no template has this id.
    pub fn delete_template(&mut self, id: &str) -> Result<()> {
        self.mutate("delete_template", |tx, ctx| {
            let rows = tx.execute("DELETE FROM event_templates WHERE id = ?1", [id])?;
            if rows == 0 {
                return Err(Error::NotFound {
                    kind: EntityKind::EventTemplate,
                    id: id.to_string(),
                });
            }
            ctx.touch(EntityKind::EventTemplate, rows);
            Ok(())
        })
    }

    /// Templates in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_templates(&self) -> Result<Vec<EventTemplate>> {
        self.get_all_templates()
    }

    /// Set each listed template's sort order to its position in `ids`.
    ///
    /// All-or-nothing: an unknown id rolls back every change.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for the first unknown id.
    pub fn reorder_templates(&mut self, ids: &[String]) -> Result<()> {
        self.mutate("reorder_templates", |tx, ctx| {
            let mut stmt = tx.prepare("UPDATE event_templates SET sort_order = ?1 WHERE id = ?2")?;
            for (index, id) in ids.iter().enumerate() {
                let sort_order = i64::try_from(index)
                    .map_err(|_| Error::InvalidArgument("too many templates".into()))?;
                if stmt.execute(rusqlite::params![sort_order, id])? == 0 {
                    return Err(Error::NotFound {
                        kind: EntityKind::EventTemplate,
                        id: id.clone(),
                    });
                }
            }
            ctx.touch(EntityKind::EventTemplate, ids.len());
            Ok(())
        })
    }

    /// Move the template at position `from` to position `to` and renumber.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if either position is out of range.
    pub fn move_template(&mut self, from: usize, to: usize) -> Result<Vec<EventTemplate>> {
        let mut ids: Vec<String> = self
            .list_templates()?
            .into_iter()
            .map(|template| template.id)
            .collect();
        if from >= ids.len() || to >= ids.len() {
            return Err(Error::InvalidArgument(format!(
                "positions {from} -> {to} out of range for {} templates",
                ids.len()
            )));
        }

        let moved = ids.remove(from);
        ids.insert(to, moved);
        self.reorder_templates(&ids)?;
        self.list_templates()
    }

    /// Materialize one calendar event per date from a template.
    ///
    /// Dates that would duplicate an existing event are reported in
    /// [`ApplyOutcome::conflicts`]; the remaining dates are still created.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown template and `InvalidArgument` if
    /// its stored times are not valid times of day.
    pub fn apply_template(&mut self, template_id: &str, dates: &[NaiveDate]) -> Result<ApplyOutcome> {
        let template = self.get_template(template_id)?.ok_or_else(|| Error::NotFound {
            kind: EntityKind::EventTemplate,
            id: template_id.to_string(),
        })?;

        self.mutate("apply_template", |tx, ctx| {
            let mut outcome = ApplyOutcome::default();
            for &date in dates {
                let (start, end) = template.materialize_on(date).ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "template {} has unreadable times {}-{}",
                        template.id, template.start_time, template.end_time
                    ))
                })?;

                if let Some(existing_id) = find_duplicate_event(
                    tx,
                    &template.title,
                    start,
                    end,
                    template.color.as_ref(),
                    None,
                )? {
                    debug!(%date, existing_id = %existing_id, "Skipping duplicate date");
                    outcome.conflicts.push(DuplicateConflict { date, existing_id });
                    continue;
                }

                let event = CalendarEvent {
                    id: new_id(),
                    title: template.title.clone(),
                    start,
                    end,
                    memo: template.memo.clone(),
                    all_day: template.all_day,
                    color: template.color.clone(),
                    sort_order: template.sort_order,
                };
                write_calendar_event(tx, &event)?;
                outcome.created.push(event);
            }
            ctx.touch(EntityKind::CalendarEvent, outcome.created.len());
            Ok(outcome)
        })
        .inspect(|outcome| {
            info!(
                template = template_id,
                created = outcome.created.len(),
                conflicts = outcome.conflicts.len(),
                "Applied template"
            );
        })
    }

    // ==================
    // Calendar events
    // ==================

    /// Create a calendar event, rejecting exact duplicates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank title or `end <= start`, and
    /// `DuplicateRecord` naming the existing event.
    pub fn create_calendar_event(&mut self, input: &NewCalendarEvent) -> Result<CalendarEvent> {
        input.validate()?;

        self.mutate("create_calendar_event", |tx, ctx| {
            if let Some(existing_id) = find_duplicate_event(
                tx,
                &input.title,
                input.start,
                input.end,
                input.color.as_ref(),
                None,
            )? {
                return Err(Error::DuplicateRecord {
                    kind: EntityKind::CalendarEvent,
                    existing_id,
                    title: input.title.clone(),
                });
            }

            let event = CalendarEvent {
                id: new_id(),
                title: input.title.clone(),
                start: input.start,
                end: input.end,
                memo: input.memo.clone().filter(|m| !m.is_empty()),
                all_day: input.all_day,
                color: input.color.clone(),
                sort_order: input.sort_order,
            };
            write_calendar_event(tx, &event)?;
            ctx.touch(EntityKind::CalendarEvent, 1);
            Ok(event)
        })
    }

    /// Edit a calendar event, excluding itself from the duplicate check.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, plus the errors of
    /// [`create_calendar_event`](Self::create_calendar_event).
    pub fn update_calendar_event(
        &mut self,
        id: &str,
        input: &NewCalendarEvent,
    ) -> Result<CalendarEvent> {
        input.validate()?;

        self.mutate("update_calendar_event", |tx, ctx| {
            let exists: Option<String> = tx
                .query_row("SELECT id FROM calendar_events WHERE id = ?1", [id], |row| {
                    row.get(0)
                })
                .optional()?;
            if exists.is_none() {
                return Err(Error::NotFound {
                    kind: EntityKind::CalendarEvent,
                    id: id.to_string(),
                });
            }

            if let Some(existing_id) = find_duplicate_event(
                tx,
                &input.title,
                input.start,
                input.end,
                input.color.as_ref(),
                Some(id),
            )? {
                return Err(Error::DuplicateRecord {
                    kind: EntityKind::CalendarEvent,
                    existing_id,
                    title: input.title.clone(),
                });
            }

            let event = CalendarEvent {
                id: id.to_string(),
                title: input.title.clone(),
                start: input.start,
                end: input.end,
                memo: input.memo.clone().filter(|m| !m.is_empty()),
                all_day: input.all_day,
                color: input.color.clone(),
                sort_order: input.sort_order,
            };
            write_calendar_event(tx, &event)?;
            ctx.touch(EntityKind::CalendarEvent, 1);
            Ok(event)
        })
    }

    /// Delete a calendar event.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no event has this id.
    pub fn delete_calendar_event(&mut self, id: &str) -> Result<()> {
        self.mutate("delete_calendar_event", |tx, ctx| {
            let rows = tx.execute("DELETE FROM calendar_events WHERE id = ?1", [id])?;
            if rows == 0 {
                return Err(Error::NotFound {
                    kind: EntityKind::CalendarEvent,
                    id: id.to_string(),
                });
            }
            ctx.touch(EntityKind::CalendarEvent, rows);
            Ok(())
        })
    }

    /// All calendar events by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_calendar_events(&self) -> Result<Vec<CalendarEvent>> {
        self.get_all_calendar_events()
    }

    /// Events starting on the given day, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        let from = date.and_hms_opt(0, 0, 0).map(format_datetime);
        let until = date
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .map(format_datetime);
        let (Some(from), Some(until)) = (from, until) else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn().prepare(&format!(
            "{EVENT_SELECT} WHERE start_at >= ?1 AND start_at < ?2
             ORDER BY sort_order ASC, start_at ASC, id ASC"
        ))?;
        let rows = stmt.query_map([from, until], map_calendar_event)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Events falling entirely inside one month.
    ///
    /// Selects `start >= first day of month` and `end < first day of the
    /// following month`, so an event running past midnight on the last
    /// day is excluded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an impossible year/month.
    pub fn events_in_month(&self, year: i32, month: u32) -> Result<Vec<CalendarEvent>> {
        let (first, next) = month_bounds(year, month)?;
        let mut stmt = self.conn().prepare(&format!(
            "{EVENT_SELECT} WHERE start_at >= ?1 AND end_at < ?2
             ORDER BY start_at ASC, sort_order ASC, id ASC"
        ))?;
        let rows = stmt.query_map([format_datetime(first), format_datetime(next)], map_calendar_event)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // ==================
    // Holidays
    // ==================

    /// Cached holidays by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_holidays(&self) -> Result<Vec<Holiday>> {
        self.get_all_holidays()
    }

    /// Whether the date is a cached holiday.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        Ok(self
            .get_holiday(&date.format(DATE_FORMAT).to_string())?
            .is_some())
    }
}

/// Midnight of the first day of `month` and of the month after it.
pub(crate) fn month_bounds(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let invalid = || Error::InvalidArgument(format!("invalid month {year}-{month:02}"));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    match (first.and_hms_opt(0, 0, 0), next.and_hms_opt(0, 0, 0)) {
        (Some(first), Some(next)) => Ok((first, next)),
        _ => Err(invalid()),
    }
}

fn find_duplicate_template(
    conn: &Connection,
    title: &str,
    start_time: &str,
    end_time: &str,
    color: Option<&ColorData>,
    exclude_id: Option<&str>,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT id FROM event_templates
         WHERE title = ?1 AND start_time = ?2 AND end_time = ?3 AND color IS ?4
           AND (?5 IS NULL OR id != ?5)
         LIMIT 1",
        rusqlite::params![
            title,
            start_time,
            end_time,
            color.map(ColorData::as_bytes),
            exclude_id
        ],
        |row| row.get(0),
    )
    .optional()
}

fn find_duplicate_event(
    conn: &Connection,
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    color: Option<&ColorData>,
    exclude_id: Option<&str>,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT id FROM calendar_events
         WHERE title = ?1 AND start_at = ?2 AND end_at = ?3 AND color IS ?4
           AND (?5 IS NULL OR id != ?5)
         LIMIT 1",
        rusqlite::params![
            title,
            format_datetime(start),
            format_datetime(end),
            color.map(ColorData::as_bytes),
            exclude_id
        ],
        |row| row.get(0),
    )
    .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_template(title: &str) -> NewTemplate {
        NewTemplate {
            title: title.to_string(),
            start_time: time(9, 0),
            end_time: time(9, 30),
            memo: Some(String::new()),
            all_day: false,
            color: ColorData::from_bytes(vec![0xAA]),
        }
    }

    fn new_event(title: &str, day: u32) -> NewCalendarEvent {
        NewCalendarEvent {
            title: title.to_string(),
            start: date(2025, 3, day).and_time(time(10, 0)),
            end: date(2025, 3, day).and_time(time(11, 0)),
            memo: None,
            all_day: false,
            color: None,
            sort_order: 0,
        }
    }

    #[test]
    fn test_create_template_appends_sort_order() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let first = storage.create_template(&new_template("Standup")).unwrap();
        let second = storage.create_template(&new_template("Lunch")).unwrap();

        assert_eq!(first.sort_order, 0);
        assert_eq!(second.sort_order, 1);
        assert_eq!(first.start_time, "09:00:00");
        assert_eq!(first.memo, None);
    }

    #[test]
    fn test_create_template_rejects_duplicate() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let first = storage.create_template(&new_template("Standup")).unwrap();

        let err = storage.create_template(&new_template("Standup")).unwrap_err();
        match err {
            Error::DuplicateRecord { existing_id, .. } => assert_eq!(existing_id, first.id),
            other => panic!("unexpected error: {other}"),
        }

        let mut other_color = new_template("Standup");
        other_color.color = None;
        assert!(storage.create_template(&other_color).is_ok());
    }

    #[test]
    fn test_update_template_keeps_identity() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.create_template(&new_template("A")).unwrap();
        let b = storage.create_template(&new_template("B")).unwrap();

        // Saving without changes is not a duplicate of itself.
        let same = storage.update_template(&b.id, &new_template("B")).unwrap();
        assert_eq!(same.sort_order, 1);

        let err = storage.update_template(&b.id, &new_template("A")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecord { .. }));

        let err = storage.update_template("missing", &new_template("C")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_reorder_sets_positions() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let a = storage.create_template(&new_template("A")).unwrap();
        let b = storage.create_template(&new_template("B")).unwrap();
        let c = storage.create_template(&new_template("C")).unwrap();

        storage
            .reorder_templates(&[c.id.clone(), a.id.clone(), b.id.clone()])
            .unwrap();

        let order: Vec<(String, i64)> = storage
            .list_templates()
            .unwrap()
            .into_iter()
            .map(|t| (t.id, t.sort_order))
            .collect();
        assert_eq!(order, vec![(c.id, 0), (a.id, 1), (b.id, 2)]);
    }

    #[test]
    fn test_reorder_unknown_id_rolls_back() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let a = storage.create_template(&new_template("A")).unwrap();
        let b = storage.create_template(&new_template("B")).unwrap();
        let before = storage.list_templates().unwrap();

        let err = storage
            .reorder_templates(&[b.id.clone(), "ghost".to_string(), a.id.clone()])
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(storage.list_templates().unwrap(), before);
    }

    #[test]
    fn test_move_template() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let a = storage.create_template(&new_template("A")).unwrap();
        let b = storage.create_template(&new_template("B")).unwrap();
        let c = storage.create_template(&new_template("C")).unwrap();

        let moved = storage.move_template(0, 2).unwrap();
        let ids: Vec<&str> = moved.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![b.id.as_str(), c.id.as_str(), a.id.as_str()]);

        assert!(storage.move_template(0, 3).is_err());
    }

    #[test]
    fn test_create_calendar_event_rejects_duplicate() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let first = storage.create_calendar_event(&new_event("Dentist", 4)).unwrap();

        let err = storage
            .create_calendar_event(&new_event("Dentist", 4))
            .unwrap_err();
        match err {
            Error::DuplicateRecord {
                existing_id, title, ..
            } => {
                assert_eq!(existing_id, first.id);
                assert_eq!(title, "Dentist");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(storage.list_calendar_events().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_identity_includes_color() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let mut red = new_event("Dentist", 4);
        red.color = ColorData::from_bytes(vec![1]);
        storage.create_calendar_event(&red).unwrap();

        // Same title and times without a color is a different event.
        storage.create_calendar_event(&new_event("Dentist", 4)).unwrap();

        let err = storage.create_calendar_event(&red).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecord { .. }));
        assert_eq!(storage.list_calendar_events().unwrap().len(), 2);
    }

    #[test]
    fn test_update_calendar_event_excludes_self() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let event = storage.create_calendar_event(&new_event("Dentist", 4)).unwrap();

        let mut edit = new_event("Dentist", 4);
        edit.memo = Some("bring card".into());
        let updated = storage.update_calendar_event(&event.id, &edit).unwrap();
        assert_eq!(updated.memo.as_deref(), Some("bring card"));
    }

    #[test]
    fn test_apply_template_reports_conflicts() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let template = storage.create_template(&new_template("Standup")).unwrap();

        let first = storage
            .apply_template(&template.id, &[date(2025, 3, 3)])
            .unwrap();
        assert_eq!(first.created.len(), 1);

        let second = storage
            .apply_template(&template.id, &[date(2025, 3, 3), date(2025, 3, 4)])
            .unwrap();
        assert_eq!(second.created.len(), 1);
        assert_eq!(second.conflicts.len(), 1);
        assert_eq!(second.conflicts[0].existing_id, first.created[0].id);

        let created = &second.created[0];
        assert_eq!(created.start, date(2025, 3, 4).and_time(time(9, 0)));
        assert_eq!(created.sort_order, template.sort_order);
    }

    #[test]
    fn test_events_in_month_excludes_overflowing_events() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.create_calendar_event(&new_event("Inside", 15)).unwrap();

        let mut overflow = new_event("Overnight", 31);
        overflow.start = date(2025, 3, 31).and_time(time(23, 0));
        overflow.end = date(2025, 4, 1).and_time(time(1, 0));
        storage.create_calendar_event(&overflow).unwrap();

        let march = storage.events_in_month(2025, 3).unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].title, "Inside");

        assert!(storage.events_in_month(2025, 13).is_err());
    }

    #[test]
    fn test_events_on_day() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.create_calendar_event(&new_event("A", 5)).unwrap();
        storage.create_calendar_event(&new_event("B", 6)).unwrap();

        let day = storage.events_on(date(2025, 3, 5)).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "A");
    }

    #[test]
    fn test_month_bounds_wraps_year() {
        let (first, next) = month_bounds(2024, 12).unwrap();
        assert_eq!(first.date(), date(2024, 12, 1));
        assert_eq!(next.date(), date(2025, 1, 1));
    }
}
