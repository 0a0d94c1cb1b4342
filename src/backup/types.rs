//! Backup document and import/export bookkeeping types.
//!
//! The wire records mirror the backup JSON field-for-field; the model types
//! in [`crate::model`] are what the store holds. [`super::Codec`] converts
//! between the two.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::hash::content_hash;
use crate::error::Result;
use crate::model::EntityKind;

/// A complete backup: one array per entity kind.
///
/// All three keys are mandatory on import; empty arrays are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(rename = "eventData")]
    pub event_data: Vec<TemplateRecord>,
    #[serde(rename = "calendarEventData")]
    pub calendar_event_data: Vec<CalendarEventRecord>,
    #[serde(rename = "holidayData")]
    pub holiday_data: Vec<HolidayRecord>,
}

/// Wire form of an event template.
///
/// `event_start_date` / `event_end_date` carry the template's `HH:mm:ss`
/// strings verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: String,
    pub event_title: String,
    pub event_start_date: String,
    pub event_end_date: String,
    pub event_memo: String,
    pub all_day: bool,
    pub color_data: String,
    pub sort_order: i64,
}

/// Wire form of a calendar event; dates are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventRecord {
    pub id: String,
    pub event_title: String,
    pub event_start_date: String,
    pub event_end_date: String,
    pub event_memo: String,
    pub all_day: bool,
    pub color_data: String,
    pub sort_order: i64,
}

/// Wire form of a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: String,
    pub name: String,
}

/// How imported records are reconciled with the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Insert or overwrite by primary key; records not in the document stay.
    #[default]
    Upsert,
    /// Delete every record of every kind, then insert the document.
    Replace,
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upsert => write!(f, "upsert"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Values used for calendar event dates that fail to parse on insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeDefaults {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Importer configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Run the whole import in one transaction instead of one per kind.
    pub atomic: bool,
    pub defaults: DecodeDefaults,
}

/// Statistics for an export operation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExportStats {
    /// Number of templates exported.
    pub templates: usize,
    /// Number of calendar events exported.
    pub calendar_events: usize,
    /// Number of holidays exported.
    pub holidays: usize,
    /// SHA256 of the serialized document.
    pub content_hash: String,
}

impl ExportStats {
    /// Count and fingerprint a document.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the document cannot be serialized.
    pub fn for_document(document: &BackupDocument) -> Result<Self> {
        Ok(Self {
            templates: document.event_data.len(),
            calendar_events: document.calendar_event_data.len(),
            holidays: document.holiday_data.len(),
            content_hash: content_hash(document)?,
        })
    }

    /// Total number of records exported.
    #[must_use]
    pub fn total(&self) -> usize {
        self.templates + self.calendar_events + self.holidays
    }

    /// Returns true if nothing was exported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Per-kind statistics for import operations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct KindStats {
    /// Records that did not exist before.
    pub created: usize,
    /// Existing records overwritten with different content.
    pub updated: usize,
    /// Existing records identical to the imported ones.
    pub unchanged: usize,
    /// Records that could not be decoded.
    pub skipped: usize,
}

impl KindStats {
    /// Total records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged + self.skipped
    }
}

/// A record left out of an import because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub kind: EntityKind,
    /// Position in the kind's array.
    pub index: usize,
    /// The record's id, when it had a readable one.
    pub id: Option<String>,
    pub reason: String,
}

/// Statistics for an import operation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub templates: KindStats,
    pub calendar_events: KindStats,
    pub holidays: KindStats,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportStats {
    #[must_use]
    pub fn kind(&self, kind: EntityKind) -> &KindStats {
        match kind {
            EntityKind::EventTemplate => &self.templates,
            EntityKind::CalendarEvent => &self.calendar_events,
            EntityKind::Holiday => &self.holidays,
        }
    }

    pub fn kind_mut(&mut self, kind: EntityKind) -> &mut KindStats {
        match kind {
            EntityKind::EventTemplate => &mut self.templates,
            EntityKind::CalendarEvent => &mut self.calendar_events,
            EntityKind::Holiday => &mut self.holidays,
        }
    }

    /// Total number of records processed.
    #[must_use]
    pub fn total_processed(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.kind(*k).total()).sum()
    }

    /// Total number of records created.
    #[must_use]
    pub fn total_created(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.kind(*k).created).sum()
    }

    /// Total number of records updated.
    #[must_use]
    pub fn total_updated(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.kind(*k).updated).sum()
    }

    /// Total number of records skipped.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.kind(*k).skipped).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wire_keys() {
        let json = serde_json::to_value(BackupDocument::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        for kind in EntityKind::ALL {
            assert!(obj[kind.wire_key()].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_template_record_field_names() {
        let record = TemplateRecord {
            id: "t1".into(),
            event_title: "Standup".into(),
            event_start_date: "09:00:00".into(),
            event_end_date: "09:15:00".into(),
            event_memo: String::new(),
            all_day: false,
            color_data: String::new(),
            sort_order: 0,
        };
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "id",
            "eventTitle",
            "eventStartDate",
            "eventEndDate",
            "eventMemo",
            "allDay",
            "colorData",
            "sortOrder",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_import_stats_totals() {
        let mut stats = ImportStats::default();
        stats.kind_mut(EntityKind::EventTemplate).created = 2;
        stats.kind_mut(EntityKind::Holiday).unchanged = 3;
        stats.kind_mut(EntityKind::CalendarEvent).skipped = 1;

        assert_eq!(stats.total_processed(), 6);
        assert_eq!(stats.total_created(), 2);
        assert_eq!(stats.total_skipped(), 1);
    }

    #[test]
    fn test_export_stats_hash() {
        let stats = ExportStats::for_document(&BackupDocument::default()).unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats.content_hash.len(), 64);
    }
}
