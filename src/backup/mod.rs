//! Backup and restore.
//!
//! This module converts the whole store to and from a single JSON document:
//!
//! - **Codec**: entity ↔ wire record conversion (dates, base64 colors)
//! - **Export**: store snapshot → [`BackupDocument`]
//! - **Import**: document → store, in [`ImportMode::Upsert`] or
//!   [`ImportMode::Replace`]
//! - **Hashing**: SHA256 fingerprint of exported documents
//!
//! # File Format
//!
//! ```json
//! {
//!   "eventData": [{"id": "...", "eventTitle": "Standup", "eventStartDate": "09:00:00", ...}],
//!   "calendarEventData": [{"id": "...", "eventStartDate": "2025-01-06T09:00:00Z", ...}],
//!   "holidayData": [{"date": "2025-01-01", "name": "New Year"}]
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use caljournal::backup::{Codec, Exporter, Importer, ImportMode};
//!
//! let json = Exporter::new(&storage, Codec::utc()).export_to_string()?.0;
//! let stats = Importer::new(&mut other, Codec::utc()).import_from_str(&json, ImportMode::Upsert)?;
//! ```

mod codec;
mod export;
mod file;
mod hash;
mod import;
mod types;

pub use codec::{Codec, DecodeError, Zone, record_id};
pub use export::Exporter;
pub use file::{atomic_write, parse_document, read_document};
pub use hash::content_hash;
pub use import::Importer;
pub use types::{
    BackupDocument, CalendarEventRecord, DecodeDefaults, ExportStats, HolidayRecord, ImportMode,
    ImportOptions, ImportStats, KindStats, SkippedRecord, TemplateRecord,
};
