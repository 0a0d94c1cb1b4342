//! Backup import.
//!
//! An import runs in two phases:
//!
//! 1. **Plan**: validate the document shape, decode every record through
//!    the [`Codec`] and classify it against the store (created, updated,
//!    unchanged). Nothing is written; a record that fails to decode is
//!    logged and recorded in [`ImportStats::skipped`].
//! 2. **Apply**: write the plan, one transaction per entity kind in the
//!    order templates, calendar events, holidays. With
//!    [`ImportOptions::atomic`] the whole plan shares one transaction.
//!
//! In per-kind mode a store failure leaves earlier kinds committed and is
//! reported as [`Error::PartialImport`].

use std::collections::HashSet;
use std::path::Path;

use rusqlite::Connection;
use serde_json::Value;
use tracing::{info, warn};

use super::codec::{Codec, DecodeError, record_id};
use super::file::{parse_document, read_document};
use super::types::{ImportMode, ImportOptions, ImportStats, KindStats, SkippedRecord};
use crate::error::{Error, Result};
use crate::model::{CalendarEvent, EntityKind, EventTemplate, Holiday};
use crate::storage::SqliteStorage;
use crate::storage::sqlite::{delete_all_in, write_calendar_event, write_holiday, write_template};

/// Importer for backup documents.
pub struct Importer<'a> {
    storage: &'a mut SqliteStorage,
    codec: Codec,
    options: ImportOptions,
}

impl<'a> Importer<'a> {
    /// Create an importer with default options (per-kind transactions).
    #[must_use]
    pub fn new(storage: &'a mut SqliteStorage, codec: Codec) -> Self {
        Self::with_options(storage, codec, ImportOptions::default())
    }

    #[must_use]
    pub fn with_options(
        storage: &'a mut SqliteStorage,
        codec: Codec,
        options: ImportOptions,
    ) -> Self {
        Self {
            storage,
            codec,
            options,
        }
    }

    /// Import a parsed backup document.
    ///
    /// # Errors
    ///
    /// - `MalformedBackup` if the document is not an object with the three
    ///   array keys; the store is untouched
    /// - `PartialImport` if a kind failed after earlier kinds committed
    /// - `StorageUnavailable` if the store failed before anything committed
    pub fn import(&mut self, document: &Value, mode: ImportMode) -> Result<ImportStats> {
        let [templates, calendar_events, holidays] = sections(document)?;
        let plan = self.plan(templates, calendar_events, holidays, mode)?;

        let mut stats = ImportStats::default();
        for skipped in &plan.skipped {
            stats.kind_mut(skipped.kind).skipped += 1;
        }
        stats.skipped.clone_from(&plan.skipped);

        if self.options.atomic {
            self.apply_atomic(&plan, mode, &mut stats)?;
        } else {
            self.apply_per_kind(&plan, mode, &mut stats)?;
        }

        info!(
            %mode,
            created = stats.total_created(),
            updated = stats.total_updated(),
            skipped = stats.total_skipped(),
            "Import complete"
        );
        Ok(stats)
    }

    /// Parse and import backup text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBackup` if the text is not JSON, plus the errors of
    /// [`import`](Self::import).
    pub fn import_from_str(&mut self, text: &str, mode: ImportMode) -> Result<ImportStats> {
        let document = parse_document(text)?;
        self.import(&document, mode)
    }

    /// Read, parse and import a backup file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, plus the errors of
    /// [`import_from_str`](Self::import_from_str).
    pub fn import_from_path(&mut self, path: &Path, mode: ImportMode) -> Result<ImportStats> {
        let document = read_document(path)?;
        self.import(&document, mode)
    }

    // ==================
    // Planning
    // ==================

    fn plan(
        &self,
        templates: &[Value],
        calendar_events: &[Value],
        holidays: &[Value],
        mode: ImportMode,
    ) -> Result<Plan> {
        let upsert = mode == ImportMode::Upsert;
        let mut plan = Plan::default();
        let mut seen = HashSet::new();

        for (index, value) in templates.iter().enumerate() {
            match self.codec.decode_template(value) {
                Ok(template) => {
                    let existing = if upsert {
                        self.storage.get_template(&template.id)?
                    } else {
                        None
                    };
                    let first = seen.insert((EntityKind::EventTemplate, template.id.clone()));
                    let disposition = classify(existing.as_ref(), &template, first);
                    plan.templates.push((template, disposition));
                }
                Err(e) => plan.skip(EntityKind::EventTemplate, index, value, &e),
            }
        }

        for (index, value) in calendar_events.iter().enumerate() {
            let existing = match record_id(value) {
                Some(id) if upsert => self.storage.get_calendar_event(&id)?,
                _ => None,
            };
            match self.codec.decode_calendar_event(
                value,
                existing.as_ref(),
                &self.options.defaults,
            ) {
                Ok(event) => {
                    let first = seen.insert((EntityKind::CalendarEvent, event.id.clone()));
                    let disposition = classify(existing.as_ref(), &event, first);
                    plan.calendar_events.push((event, disposition));
                }
                Err(e) => plan.skip(EntityKind::CalendarEvent, index, value, &e),
            }
        }

        for (index, value) in holidays.iter().enumerate() {
            match self.codec.decode_holiday(value) {
                Ok(holiday) => {
                    let existing = if upsert {
                        self.storage.get_holiday(&holiday.date)?
                    } else {
                        None
                    };
                    let first = seen.insert((EntityKind::Holiday, holiday.date.clone()));
                    let disposition = classify(existing.as_ref(), &holiday, first);
                    plan.holidays.push((holiday, disposition));
                }
                Err(e) => plan.skip(EntityKind::Holiday, index, value, &e),
            }
        }

        Ok(plan)
    }

    // ==================
    // Applying
    // ==================

    fn apply_per_kind(
        &mut self,
        plan: &Plan,
        mode: ImportMode,
        stats: &mut ImportStats,
    ) -> Result<()> {
        let mut committed: Vec<EntityKind> = Vec::new();

        for kind in EntityKind::ALL {
            // Replace clears the store inside the first kind's transaction.
            let clear = mode == ImportMode::Replace && committed.is_empty();
            let result = self.storage.mutate(kind.table(), |tx, ctx| {
                if clear {
                    for cleared in EntityKind::ALL {
                        ctx.touch(cleared, delete_all_in(tx, cleared)?);
                    }
                }
                ctx.touch(kind, plan.write_kind(tx, kind)?);
                Ok(())
            });

            match result {
                Ok(()) => {
                    plan.tally(kind, stats.kind_mut(kind));
                    info!(%kind, stats = ?stats.kind(kind), "Imported kind");
                    committed.push(kind);
                }
                Err(source) if committed.is_empty() => return Err(source),
                Err(source) => {
                    warn!(%kind, error = %source, "Import stopped partway");
                    return Err(Error::PartialImport {
                        committed,
                        stats: Box::new(stats.clone()),
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(())
    }

    fn apply_atomic(&mut self, plan: &Plan, mode: ImportMode, stats: &mut ImportStats) -> Result<()> {
        self.storage.mutate("import_atomic", |tx, ctx| {
            if mode == ImportMode::Replace {
                for kind in EntityKind::ALL {
                    ctx.touch(kind, delete_all_in(tx, kind)?);
                }
            }
            for kind in EntityKind::ALL {
                ctx.touch(kind, plan.write_kind(tx, kind)?);
            }
            Ok(())
        })?;

        for kind in EntityKind::ALL {
            plan.tally(kind, stats.kind_mut(kind));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Create,
    Update,
    Unchanged,
}

fn classify<T: PartialEq>(existing: Option<&T>, incoming: &T, first_in_document: bool) -> Disposition {
    if !first_in_document {
        return Disposition::Update;
    }
    match existing {
        None => Disposition::Create,
        Some(current) if current == incoming => Disposition::Unchanged,
        Some(_) => Disposition::Update,
    }
}

/// Decoded records, ready to write.
#[derive(Debug, Default)]
struct Plan {
    templates: Vec<(EventTemplate, Disposition)>,
    calendar_events: Vec<(CalendarEvent, Disposition)>,
    holidays: Vec<(Holiday, Disposition)>,
    skipped: Vec<SkippedRecord>,
}

impl Plan {
    fn skip(&mut self, kind: EntityKind, index: usize, value: &Value, error: &DecodeError) {
        let id = record_id(value).or_else(|| {
            value
                .get("date")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
        let skipped = Error::RecordDecodeSkipped {
            kind,
            index,
            reason: error.to_string(),
        };
        warn!(id = ?id, "{skipped}");
        self.skipped.push(SkippedRecord {
            kind,
            index,
            id,
            reason: error.to_string(),
        });
    }

    fn dispositions(&self, kind: EntityKind) -> Vec<Disposition> {
        match kind {
            EntityKind::EventTemplate => self.templates.iter().map(|(_, d)| *d).collect(),
            EntityKind::CalendarEvent => self.calendar_events.iter().map(|(_, d)| *d).collect(),
            EntityKind::Holiday => self.holidays.iter().map(|(_, d)| *d).collect(),
        }
    }

    /// Write every record of `kind` that is new or changed.
    fn write_kind(&self, conn: &Connection, kind: EntityKind) -> rusqlite::Result<usize> {
        let mut written = 0;
        match kind {
            EntityKind::EventTemplate => {
                for (template, disposition) in &self.templates {
                    if *disposition != Disposition::Unchanged {
                        write_template(conn, template)?;
                        written += 1;
                    }
                }
            }
            EntityKind::CalendarEvent => {
                for (event, disposition) in &self.calendar_events {
                    if *disposition != Disposition::Unchanged {
                        write_calendar_event(conn, event)?;
                        written += 1;
                    }
                }
            }
            EntityKind::Holiday => {
                for (holiday, disposition) in &self.holidays {
                    if *disposition != Disposition::Unchanged {
                        write_holiday(conn, holiday)?;
                        written += 1;
                    }
                }
            }
        }
        Ok(written)
    }

    fn tally(&self, kind: EntityKind, stats: &mut KindStats) {
        for disposition in self.dispositions(kind) {
            match disposition {
                Disposition::Create => stats.created += 1,
                Disposition::Update => stats.updated += 1,
                Disposition::Unchanged => stats.unchanged += 1,
            }
        }
    }
}

/// Check the document shape and return the three record arrays.
fn sections(document: &Value) -> Result<[&[Value]; 3]> {
    let obj = document
        .as_object()
        .ok_or_else(|| Error::MalformedBackup("backup must be a JSON object".into()))?;

    let missing: Vec<&str> = EntityKind::ALL
        .iter()
        .map(EntityKind::wire_key)
        .filter(|key| !obj.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(Error::MalformedBackup(format!(
            "missing required key(s): {}",
            missing.join(", ")
        )));
    }

    let mut out: [&[Value]; 3] = [&[]; 3];
    for (slot, kind) in out.iter_mut().zip(EntityKind::ALL) {
        *slot = obj
            .get(kind.wire_key())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::MalformedBackup(format!("`{}` must be an array", kind.wire_key()))
            })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::Exporter;
    use crate::backup::types::DecodeDefaults;
    use crate::model::ColorData;
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
    use serde_json::json;
    use tempfile::TempDir;

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn seeded() -> SqliteStorage {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage
            .upsert_template(&EventTemplate {
                id: "t1".into(),
                title: "Standup".into(),
                start_time: "09:00:00".into(),
                end_time: "09:15:00".into(),
                memo: Some("daily".into()),
                all_day: false,
                color: ColorData::from_bytes(vec![9, 8, 7]),
                sort_order: 0,
            })
            .unwrap();
        storage
            .upsert_calendar_event(&CalendarEvent {
                id: "e1".into(),
                title: "Standup".into(),
                start: at(7, 9),
                end: at(7, 10),
                memo: None,
                all_day: false,
                color: ColorData::from_bytes(vec![9, 8, 7]),
                sort_order: 0,
            })
            .unwrap();
        storage
            .upsert_holiday(&Holiday {
                date: "2025-04-29".into(),
                name: "Showa Day".into(),
            })
            .unwrap();
        storage
    }

    fn export_value(storage: &SqliteStorage, codec: Codec) -> Value {
        serde_json::to_value(Exporter::new(storage, codec).export().unwrap()).unwrap()
    }

    fn block_holiday_writes(storage: &SqliteStorage) {
        storage
            .conn()
            .execute_batch(
                "CREATE TRIGGER block_holidays BEFORE INSERT ON holidays
                 BEGIN SELECT RAISE(ABORT, 'holiday writes disabled'); END;",
            )
            .unwrap();
    }

    #[test]
    fn test_import_literal_document() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let document = json!({
            "eventData": [{
                "id": "e1", "eventTitle": "Standup", "eventStartDate": "09:00:00",
                "eventEndDate": "09:15:00", "eventMemo": "", "allDay": false,
                "colorData": "", "sortOrder": 0
            }],
            "calendarEventData": [],
            "holidayData": [{"date": "2025-01-01", "name": "New Year"}]
        });

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.templates.created, 1);
        assert_eq!(stats.holidays.created, 1);

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(snapshot.templates.len(), 1);
        assert_eq!(snapshot.templates[0].title, "Standup");
        assert_eq!(snapshot.templates[0].memo, None);
        assert!(snapshot.calendar_events.is_empty());
        assert_eq!(snapshot.holidays.len(), 1);
        assert_eq!(snapshot.holidays[0].date, "2025-01-01");
    }

    #[test]
    fn test_round_trip_into_empty_store() {
        for codec in [
            Codec::utc(),
            Codec::with_offset(FixedOffset::west_opt(5 * 3600).unwrap()),
        ] {
            let source = seeded();
            let document = export_value(&source, codec);

            let mut target = SqliteStorage::open_memory().unwrap();
            Importer::new(&mut target, codec)
                .import(&document, ImportMode::Upsert)
                .unwrap();

            assert_eq!(target.snapshot().unwrap(), source.snapshot().unwrap());
        }
    }

    #[test]
    fn test_round_trip_keeps_wall_clock_across_seasons() {
        let mut source = SqliteStorage::open_memory().unwrap();
        for (id, start) in [
            ("summer", NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()),
            ("winter", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
        ] {
            source
                .upsert_calendar_event(&CalendarEvent {
                    id: id.into(),
                    title: id.into(),
                    start: start.and_hms_opt(14, 0, 0).unwrap(),
                    end: start.and_hms_opt(15, 0, 0).unwrap(),
                    memo: None,
                    all_day: false,
                    color: None,
                    sort_order: 0,
                })
                .unwrap();
        }

        let codec = Codec::in_zone(chrono_tz::America::New_York);
        let document = export_value(&source, codec);
        assert_eq!(
            document["calendarEventData"][0]["eventStartDate"],
            "2025-01-15T14:00:00-05:00"
        );
        assert_eq!(
            document["calendarEventData"][1]["eventStartDate"],
            "2025-07-04T14:00:00-04:00"
        );

        let mut target = SqliteStorage::open_memory().unwrap();
        Importer::new(&mut target, codec)
            .import(&document, ImportMode::Upsert)
            .unwrap();
        assert_eq!(target.snapshot().unwrap(), source.snapshot().unwrap());
    }

    #[test]
    fn test_unpadded_holiday_date_shares_key_with_padded() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let document = |date: &str| {
            json!({
                "eventData": [],
                "calendarEventData": [],
                "holidayData": [{"date": date, "name": "New Year"}]
            })
        };

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document("2025-1-1"), ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.holidays.created, 1);
        assert!(
            storage
                .is_holiday(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
                .unwrap()
        );

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document("2025-01-01"), ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.holidays.unchanged, 1);
        assert_eq!(storage.count(EntityKind::Holiday).unwrap(), 1);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut storage = seeded();
        let document = export_value(&storage, Codec::utc());
        let before = storage.snapshot().unwrap();

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.total_created(), 0);
        assert_eq!(stats.total_updated(), 0);
        assert_eq!(stats.templates.unchanged, 1);
        assert_eq!(storage.snapshot().unwrap(), before);
    }

    #[test]
    fn test_upsert_updates_and_keeps_absent_records() {
        let mut storage = seeded();
        let document = json!({
            "eventData": [{
                "id": "t1", "eventTitle": "Standup (moved)", "eventStartDate": "09:30:00",
                "eventEndDate": "09:45:00", "sortOrder": 0
            }],
            "calendarEventData": [],
            "holidayData": []
        });

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.templates.updated, 1);

        let template = storage.get_template("t1").unwrap().unwrap();
        assert_eq!(template.title, "Standup (moved)");
        assert_eq!(template.color, None);
        assert!(storage.get_calendar_event("e1").unwrap().is_some());
        assert_eq!(storage.list_holidays().unwrap().len(), 1);
    }

    #[test]
    fn test_replace_discards_records_not_in_document() {
        let mut storage = seeded();
        let document = json!({
            "eventData": [],
            "calendarEventData": [],
            "holidayData": [{"date": "2025-05-03", "name": "Constitution Day"}]
        });

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Replace)
            .unwrap();
        assert_eq!(stats.holidays.created, 1);

        let snapshot = storage.snapshot().unwrap();
        assert!(snapshot.templates.is_empty());
        assert!(snapshot.calendar_events.is_empty());
        assert_eq!(snapshot.holidays.len(), 1);
        assert_eq!(snapshot.holidays[0].date, "2025-05-03");
    }

    #[test]
    fn test_validation_gate_leaves_store_unchanged() {
        let mut storage = seeded();
        let before = storage.snapshot().unwrap();

        for document in [
            json!({"eventData": []}),
            json!([]),
            json!({"eventData": [], "calendarEventData": {}, "holidayData": []}),
        ] {
            for mode in [ImportMode::Upsert, ImportMode::Replace] {
                let err = Importer::new(&mut storage, Codec::utc())
                    .import(&document, mode)
                    .unwrap_err();
                assert!(matches!(err, Error::MalformedBackup(_)), "{err}");
            }
        }

        assert_eq!(storage.snapshot().unwrap(), before);
    }

    #[test]
    fn test_missing_keys_are_named() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let err = Importer::new(&mut storage, Codec::utc())
            .import(&json!({"eventData": []}), ImportMode::Upsert)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("calendarEventData"));
        assert!(message.contains("holidayData"));
    }

    #[test]
    fn test_bad_record_is_skipped_others_imported() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let document = json!({
            "eventData": [],
            "calendarEventData": [
                {"id": "good1", "eventTitle": "A", "eventStartDate": "2025-04-01T10:00:00Z",
                 "eventEndDate": "2025-04-01T11:00:00Z"},
                {"id": "bad", "eventTitle": "B", "eventStartDate": "someday",
                 "eventEndDate": "2025-04-01T11:00:00Z"},
                {"id": "good2", "eventTitle": "C", "eventStartDate": "2025-04-02T10:00:00Z",
                 "eventEndDate": "2025-04-02T11:00:00Z"}
            ],
            "holidayData": []
        });

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap();

        assert_eq!(stats.calendar_events.created, 2);
        assert_eq!(stats.calendar_events.skipped, 1);
        assert_eq!(stats.skipped.len(), 1);
        assert_eq!(stats.skipped[0].index, 1);
        assert_eq!(stats.skipped[0].id.as_deref(), Some("bad"));
        assert!(storage.get_calendar_event("bad").unwrap().is_none());
        assert_eq!(storage.list_calendar_events().unwrap().len(), 2);
    }

    #[test]
    fn test_bad_date_keeps_stored_value_on_update() {
        let mut storage = seeded();
        let document = json!({
            "eventData": [],
            "calendarEventData": [
                {"id": "e1", "eventTitle": "Renamed", "eventStartDate": "",
                 "eventEndDate": "2025-04-07T11:00:00Z"}
            ],
            "holidayData": []
        });

        let stats = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap();
        assert_eq!(stats.calendar_events.updated, 1);

        let event = storage.get_calendar_event("e1").unwrap().unwrap();
        assert_eq!(event.title, "Renamed");
        assert_eq!(event.start, at(7, 9));
        assert_eq!(event.end, at(7, 11));
    }

    #[test]
    fn test_bad_date_uses_defaults_on_insert() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let options = ImportOptions {
            atomic: false,
            defaults: DecodeDefaults {
                start: Some(at(1, 8)),
                end: Some(at(1, 9)),
            },
        };
        let document = json!({
            "eventData": [],
            "calendarEventData": [
                {"id": "n1", "eventTitle": "New", "eventStartDate": "?", "eventEndDate": "?"}
            ],
            "holidayData": []
        });

        Importer::with_options(&mut storage, Codec::utc(), options)
            .import(&document, ImportMode::Upsert)
            .unwrap();
        let event = storage.get_calendar_event("n1").unwrap().unwrap();
        assert_eq!((event.start, event.end), (at(1, 8), at(1, 9)));
    }

    #[test]
    fn test_store_failure_keeps_earlier_kinds() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        block_holiday_writes(&storage);
        let document = export_value(&seeded(), Codec::utc());

        let err = Importer::new(&mut storage, Codec::utc())
            .import(&document, ImportMode::Upsert)
            .unwrap_err();

        match err {
            Error::PartialImport {
                committed, stats, ..
            } => {
                assert_eq!(
                    committed,
                    vec![EntityKind::EventTemplate, EntityKind::CalendarEvent]
                );
                assert_eq!(stats.templates.created, 1);
                assert_eq!(stats.holidays.created, 0);
            }
            other => panic!("unexpected error: {other}"),
        }

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(snapshot.templates.len(), 1);
        assert_eq!(snapshot.calendar_events.len(), 1);
        assert!(snapshot.holidays.is_empty());
    }

    #[test]
    fn test_atomic_import_rolls_back_everything() {
        let mut storage = seeded();
        block_holiday_writes(&storage);
        let before = storage.snapshot().unwrap();
        let document = json!({
            "eventData": [],
            "calendarEventData": [],
            "holidayData": [{"date": "2025-05-05", "name": "Children's Day"}]
        });

        let options = ImportOptions {
            atomic: true,
            ..ImportOptions::default()
        };
        let err = Importer::with_options(&mut storage, Codec::utc(), options)
            .import(&document, ImportMode::Replace)
            .unwrap_err();

        assert!(matches!(err, Error::StorageUnavailable(_)));
        assert_eq!(storage.snapshot().unwrap(), before);
    }

    #[test]
    fn test_import_from_path_and_invalid_text() {
        let source = seeded();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.json");
        Exporter::new(&source, Codec::utc())
            .export_to_path(&path)
            .unwrap();

        let mut target = SqliteStorage::open_memory().unwrap();
        let stats = Importer::new(&mut target, Codec::utc())
            .import_from_path(&path, ImportMode::Replace)
            .unwrap();
        assert_eq!(stats.total_created(), 3);

        let err = Importer::new(&mut target, Codec::utc())
            .import_from_str("{not json", ImportMode::Upsert)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedBackup(_)));
    }
}
