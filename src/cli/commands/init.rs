//! Create the journal database.
//!
//! The schema is applied on open, so init only has to make sure the
//! directory exists and open the file once.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    recreated: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if the database exists and `force` is not
/// set, or an error if the directory or database cannot be created.
pub fn execute(db_path: Option<&PathBuf>, force: bool, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine the caljournal home directory".to_string())
    })?;

    let existed = db_path.exists();
    if existed && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if existed {
        fs::remove_file(&db_path)?;
    }

    SqliteStorage::open(&db_path)?;

    if json {
        super::print_json(&InitOutput {
            database: db_path,
            recreated: existed,
        })
    } else {
        println!("Initialized caljournal database");
        println!("  Database: {}", db_path.display());
        Ok(())
    }
}
