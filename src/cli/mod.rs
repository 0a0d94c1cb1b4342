//! CLI definitions using clap.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{ColorData, template::parse_time};

pub mod commands;

/// caljournal - event journal with JSON backup and restore
#[derive(Parser, Debug)]
#[command(name = "cj", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.caljournal/data/caljournal.db)
    #[arg(long, global = true, env = "CJ_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the journal database
    Init {
        /// Recreate the database if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export or restore a JSON backup
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Event templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Calendar events
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Public holiday cache
    Holiday {
        #[command(subcommand)]
        command: HolidayCommands,
    },

    /// Export to an external calendar
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Backup Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Write every record to a backup document
    Export {
        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Restore records from a backup document
    Import {
        /// Backup file to read
        file: PathBuf,

        /// Delete all existing records first
        #[arg(long)]
        replace: bool,

        /// Roll back everything if any write fails
        #[arg(long)]
        atomic: bool,
    },
}

// ============================================================================
// Template Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Create a template
    Add(TemplateArgs),

    /// List templates in display order
    List,

    /// Edit a template
    Edit {
        /// Template ID
        id: String,

        #[command(flatten)]
        args: TemplateArgs,
    },

    /// Delete a template
    Delete {
        /// Template ID
        id: String,
    },

    /// Move a template to a new position
    Move {
        /// Current zero-based position
        from: usize,
        /// New zero-based position
        to: usize,
    },

    /// Create one calendar event per date from a template
    Apply {
        /// Template ID
        id: String,

        /// Dates (YYYY-MM-DD)
        #[arg(required = true, num_args = 1..)]
        dates: Vec<NaiveDate>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Template title
    pub title: String,

    /// Start time (HH:MM or HH:MM:SS)
    #[arg(long, value_parser = parse_time_arg)]
    pub start: NaiveTime,

    /// End time (HH:MM or HH:MM:SS)
    #[arg(long, value_parser = parse_time_arg)]
    pub end: NaiveTime,

    /// Memo
    #[arg(long)]
    pub memo: Option<String>,

    /// Mark as an all-day event
    #[arg(long)]
    pub all_day: bool,

    /// Color blob, base64
    #[arg(long, value_parser = parse_color_arg)]
    pub color: Option<ColorData>,
}

// ============================================================================
// Event Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Create a calendar event
    Add(EventArgs),

    /// List calendar events
    List {
        /// Only events starting on this day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "month")]
        date: Option<NaiveDate>,

        /// Only events inside this month (YYYY-MM)
        #[arg(long, value_parser = parse_year_month)]
        month: Option<YearMonth>,
    },

    /// Delete a calendar event
    Delete {
        /// Event ID
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct EventArgs {
    /// Event title
    pub title: String,

    /// Start (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_datetime_arg)]
    pub start: NaiveDateTime,

    /// End (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_datetime_arg)]
    pub end: NaiveDateTime,

    /// Memo
    #[arg(long)]
    pub memo: Option<String>,

    /// Mark as an all-day event
    #[arg(long)]
    pub all_day: bool,

    /// Color blob, base64
    #[arg(long, value_parser = parse_color_arg)]
    pub color: Option<ColorData>,

    /// Display order within the day
    #[arg(long, default_value = "0")]
    pub sort_order: i64,
}

// ============================================================================
// Holiday / Calendar Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum HolidayCommands {
    /// Fetch holidays if the cache is empty
    Sync {
        /// Holiday list URL (overrides config and CJ_HOLIDAY_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List cached holidays
    List,
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommands {
    /// Write one month of events as JSON Lines
    Export {
        #[arg(long)]
        year: i32,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

fn parse_time_arg(s: &str) -> std::result::Result<NaiveTime, String> {
    parse_time(s).ok_or_else(|| format!("invalid time '{s}' (expected HH:MM or HH:MM:SS)"))
}

fn parse_datetime_arg(s: &str) -> std::result::Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("invalid date-time '{s}' (expected YYYY-MM-DDTHH:MM)"))
}

fn parse_color_arg(s: &str) -> std::result::Result<ColorData, String> {
    ColorData::from_base64(s)
        .map_err(|e| format!("invalid base64 color: {e}"))?
        .ok_or_else(|| "color must not be empty".to_string())
}

fn parse_year_month(s: &str) -> std::result::Result<YearMonth, String> {
    let invalid = || format!("invalid month '{s}' (expected YYYY-MM)");
    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(YearMonth { year, month })
}
