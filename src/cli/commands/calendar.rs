//! External calendar export.

use crate::cli::CalendarCommands;
use crate::error::Result;
use crate::sink::{JsonlSink, export_month};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Execute calendar commands.
///
/// Events go to stdout unless `--out` is given, in which case a short
/// summary is printed instead.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the output cannot
/// be written.
pub fn execute(command: &CalendarCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let CalendarCommands::Export { year, month, out } = command;
    let storage = super::open_storage(db_path)?;

    let Some(path) = out else {
        let mut sink = JsonlSink::new(io::stdout().lock());
        export_month(&storage, *year, *month, &mut sink)?;
        return Ok(());
    };

    let mut sink = JsonlSink::new(BufWriter::new(File::create(path)?));
    let exported = export_month(&storage, *year, *month, &mut sink)?;

    if json {
        super::print_json(&serde_json::json!({
            "year": year,
            "month": month,
            "exported": exported,
            "path": path.display().to_string(),
        }))
    } else {
        println!("Exported {exported} event(s) for {year}-{month:02} to {}", path.display());
        Ok(())
    }
}
