//! Backup file operations.
//!
//! Writes go through a temp file in the same directory followed by a
//! rename, so an interrupted export never leaves a truncated backup.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Write content to a file atomically.
///
/// This function:
/// 1. Writes content to a temporary file (same path with `.tmp` appended)
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched and the
/// temp file is removed.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if let Err(e) = write_then_rename(&temp_path, path, content) {
        if temp_path.exists() {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
            }
        }
        return Err(e.into());
    }
    Ok(())
}

fn write_then_rename(temp_path: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    {
        let file = File::create(temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(temp_path, path)
}

/// Read and parse a backup file into a JSON value.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `MalformedBackup` if it is
/// not UTF-8 JSON.
pub fn read_document(path: &Path) -> Result<serde_json::Value> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::MalformedBackup(format!("not valid JSON: {e}")))
}

/// Parse backup text into a JSON value.
///
/// # Errors
///
/// Returns `MalformedBackup` if the text is not JSON.
pub fn parse_document(text: &str) -> Result<serde_json::Value> {
    serde_json::from_str(text).map_err(|e| Error::MalformedBackup(format!("not valid JSON: {e}")))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("backup"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}
