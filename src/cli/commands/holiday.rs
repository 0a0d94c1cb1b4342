//! Holiday command implementations.

use crate::cli::HolidayCommands;
use crate::config::load_settings;
use crate::error::{Error, Result};
use crate::holidays::{HttpHolidaySource, PopulateOutcome, populate_if_empty};
use colored::Colorize;
use std::path::PathBuf;

/// Execute holiday commands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the fetch fails or
/// the cache cannot be written.
pub fn execute(command: &HolidayCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        HolidayCommands::Sync { endpoint } => sync(endpoint.as_deref(), db_path, json),
        HolidayCommands::List => list(db_path, json),
    }
}

fn sync(endpoint: Option<&str>, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = super::open_storage(db_path)?;
    let settings = load_settings()?;
    let endpoint = endpoint.map_or_else(|| settings.holiday_endpoint(), str::to_string);
    let source = HttpHolidaySource::new(endpoint, settings.http_timeout())?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::HolidayFetch(format!("Failed to create async runtime: {e}")))?;
    let outcome = rt.block_on(populate_if_empty(&mut storage, &source))?;

    if json {
        return super::print_json(&outcome);
    }
    match outcome {
        PopulateOutcome::AlreadyCached { count } => {
            println!("Holiday cache already holds {count} holiday(s); nothing fetched.");
        }
        PopulateOutcome::Populated { inserted, dropped } => {
            println!(
                "{} {inserted} holiday(s) from {}",
                "Cached".green().bold(),
                source.endpoint()
            );
            if dropped > 0 {
                println!("  {} {dropped} entr(ies) with unreadable dates", "Dropped".yellow());
            }
        }
    }
    Ok(())
}

fn list(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = super::open_storage(db_path)?;
    let holidays = storage.list_holidays()?;

    if json {
        return super::print_json(&holidays);
    }
    if holidays.is_empty() {
        println!("No cached holidays. Run `cj holiday sync`.");
        return Ok(());
    }
    for holiday in &holidays {
        println!("{}  {}", holiday.date.bold(), holiday.name);
    }
    Ok(())
}
