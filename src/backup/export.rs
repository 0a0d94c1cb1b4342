//! Backup export.
//!
//! Exports are full snapshots: every template, calendar event and holiday
//! in the store, encoded through the [`Codec`]. The store is only read.

use std::path::Path;

use tracing::info;

use super::codec::Codec;
use super::file::atomic_write;
use super::types::{BackupDocument, ExportStats};
use crate::error::Result;
use crate::storage::SqliteStorage;

/// Exporter for backup documents.
pub struct Exporter<'a> {
    storage: &'a SqliteStorage,
    codec: Codec,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(storage: &'a SqliteStorage, codec: Codec) -> Self {
        Self { storage, codec }
    }

    /// Snapshot the store into a backup document.
    ///
    /// Templates come out in display order, events by start time and
    /// holidays by date.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the store cannot be read.
    pub fn export(&self) -> Result<BackupDocument> {
        let snapshot = self.storage.snapshot()?;
        let document = BackupDocument {
            event_data: snapshot
                .templates
                .iter()
                .map(|t| self.codec.encode_template(t))
                .collect(),
            calendar_event_data: snapshot
                .calendar_events
                .iter()
                .map(|e| self.codec.encode_calendar_event(e))
                .collect(),
            holiday_data: snapshot
                .holidays
                .iter()
                .map(|h| self.codec.encode_holiday(h))
                .collect(),
        };

        info!(
            templates = document.event_data.len(),
            calendar_events = document.calendar_event_data.len(),
            holidays = document.holiday_data.len(),
            "Exported backup"
        );
        Ok(document)
    }

    /// Export as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on read failure and `EncodingError` if
    /// serialization fails.
    pub fn export_to_string(&self) -> Result<(String, ExportStats)> {
        let document = self.export()?;
        let stats = ExportStats::for_document(&document)?;
        let json = serde_json::to_string_pretty(&document)?;
        Ok((json, stats))
    }

    /// Export to a file, replacing it atomically.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`export_to_string`](Self::export_to_string)
    /// plus `Io` if the file cannot be written.
    pub fn export_to_path(&self, path: &Path) -> Result<ExportStats> {
        let (json, stats) = self.export_to_string()?;
        atomic_write(path, &json)?;
        info!(path = %path.display(), hash = %stats.content_hash, "Wrote backup file");
        Ok(stats)
    }
}
