//! Configuration management.
//!
//! This module resolves the database location and loads optional user
//! settings.
//!
//! # Layout
//!
//! - **Home**: `~/.caljournal/` (override with `CJ_HOME`)
//! - **Database**: `<home>/data/caljournal.db` (override with `--db` / `CJ_DB`)
//! - **Settings**: `<home>/config.json`, all keys optional

mod settings;

pub use settings::{Settings, load_settings, load_settings_from};

use std::path::{Path, PathBuf};

/// Get the caljournal home directory.
///
/// `CJ_HOME` wins when set and non-empty; otherwise `~/.caljournal/`.
#[must_use]
pub fn global_caljournal_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("CJ_HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }
    directories::BaseDirs::new().map(|b| b.home_dir().join(".caljournal"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided (`--db` flag or `CJ_DB`), use it directly
/// 2. Global location: `<home>/data/caljournal.db`
///
/// # Returns
///
/// Returns the path to the database file, or `None` if no location found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    global_caljournal_dir().map(|dir| dir.join("data").join("caljournal.db"))
}
