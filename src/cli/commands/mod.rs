//! Command implementations.

pub mod backup;
pub mod calendar;
pub mod completions;
pub mod event;
pub mod holiday;
pub mod init;
pub mod template;
pub mod version;

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::backup::Codec;
use crate::config::{Settings, resolve_db_path};
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;

/// Open the journal database, refusing to create one implicitly.
pub(crate) fn open_storage(db_path: Option<&PathBuf>) -> Result<SqliteStorage> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or(Error::NotInitialized)?;
    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }
    SqliteStorage::open(&db_path)
}

/// Codec in the configured zone, or the host's.
pub(crate) fn codec(settings: &Settings) -> Result<Codec> {
    let zone = settings.zone()?;
    debug!(%zone, "Backup date-time zone");
    Ok(Codec::new(zone))
}

/// Print a value as one line of JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string(value)?;
    println!("{payload}");
    Ok(())
}
