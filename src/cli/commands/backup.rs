//! Backup command implementations (JSON export/import).

use crate::backup::{Exporter, ImportMode, ImportOptions, ImportStats, Importer};
use crate::cli::BackupCommands;
use crate::config::load_settings;
use crate::error::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute backup commands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the backup fails.
pub fn execute(command: &BackupCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        BackupCommands::Export { out } => export(out.as_deref(), db_path, json),
        BackupCommands::Import {
            file,
            replace,
            atomic,
        } => {
            let mode = if *replace {
                ImportMode::Replace
            } else {
                ImportMode::Upsert
            };
            import(file, mode, *atomic, db_path, json)
        }
    }
}

fn export(out: Option<&Path>, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = super::open_storage(db_path)?;
    let settings = load_settings()?;
    let exporter = Exporter::new(&storage, super::codec(&settings)?);

    let Some(path) = out else {
        // The document itself is the output.
        let (document, _) = exporter.export_to_string()?;
        println!("{document}");
        return Ok(());
    };

    let stats = exporter.export_to_path(path)?;
    if json {
        let output = serde_json::json!({
            "success": true,
            "path": path.display().to_string(),
            "stats": stats,
        });
        super::print_json(&output)
    } else {
        println!("{} {}", "Backup written:".green().bold(), path.display());
        println!("  Templates:       {}", stats.templates);
        println!("  Calendar events: {}", stats.calendar_events);
        println!("  Holidays:        {}", stats.holidays);
        println!("  SHA256:          {}", stats.content_hash.dimmed());
        Ok(())
    }
}

fn import(
    file: &Path,
    mode: ImportMode,
    atomic: bool,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let mut storage = super::open_storage(db_path)?;
    let settings = load_settings()?;
    let options = ImportOptions {
        atomic,
        ..ImportOptions::default()
    };

    let stats = Importer::with_options(&mut storage, super::codec(&settings)?, options)
        .import_from_path(file, mode)?;

    if json {
        let output = serde_json::json!({
            "success": true,
            "mode": mode,
            "stats": stats,
        });
        super::print_json(&output)
    } else {
        print_import_stats(file, mode, &stats);
        Ok(())
    }
}

fn print_import_stats(file: &Path, mode: ImportMode, stats: &ImportStats) {
    println!(
        "{} {} ({mode})",
        "Imported".green().bold(),
        file.display()
    );
    println!();
    println!("  {:<16} {:>7} {:>7} {:>9} {:>7}", "", "created", "updated", "unchanged", "skipped");
    for (label, kind) in [
        ("Templates", &stats.templates),
        ("Calendar events", &stats.calendar_events),
        ("Holidays", &stats.holidays),
    ] {
        println!(
            "  {label:<16} {:>7} {:>7} {:>9} {:>7}",
            kind.created, kind.updated, kind.unchanged, kind.skipped
        );
    }

    if !stats.skipped.is_empty() {
        println!();
        println!("{}", "Skipped records:".yellow().bold());
        for skipped in &stats.skipped {
            println!(
                "  {} #{} {}: {}",
                skipped.kind,
                skipped.index,
                skipped.id.as_deref().unwrap_or("-").dimmed(),
                skipped.reason
            );
        }
    }
}
