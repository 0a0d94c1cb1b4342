//! Error types for caljournal.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

use crate::model::EntityKind;

/// Result type alias for caljournal operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    NotInitialized,
    StorageUnavailable,

    // Not Found (exit 3)
    NotFound,

    // Validation (exit 4)
    InvalidArgument,
    DuplicateRecord,

    // Backup (exit 5)
    MalformedBackup,
    RecordDecodeSkipped,
    PartialImport,

    // Encoding / I/O (exit 6)
    EncodingError,
    IoError,

    // Config (exit 7)
    ConfigError,

    // Network (exit 8)
    HolidayFetch,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DuplicateRecord => "DUPLICATE_RECORD",
            Self::MalformedBackup => "MALFORMED_BACKUP",
            Self::RecordDecodeSkipped => "RECORD_DECODE_SKIPPED",
            Self::PartialImport => "PARTIAL_IMPORT",
            Self::EncodingError => "ENCODING_ERROR",
            Self::IoError => "IO_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::HolidayFetch => "HOLIDAY_FETCH",
        }
    }

    /// Category-based exit code (2-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NotInitialized | Self::StorageUnavailable => 2,
            Self::NotFound => 3,
            Self::InvalidArgument | Self::DuplicateRecord => 4,
            Self::MalformedBackup | Self::RecordDecodeSkipped | Self::PartialImport => 5,
            Self::EncodingError | Self::IoError => 6,
            Self::ConfigError => 7,
            Self::HolidayFetch => 8,
        }
    }

    /// Whether retrying the same call can succeed without changing input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable | Self::PartialImport | Self::HolidayFetch
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in caljournal operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `cj init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Malformed backup: {0}")]
    MalformedBackup(String),

    #[error("Duplicate {kind}: '{title}' already exists as {existing_id}")]
    DuplicateRecord {
        kind: EntityKind,
        existing_id: String,
        title: String,
    },

    #[error("Skipped {kind} record #{index}: {reason}")]
    RecordDecodeSkipped {
        kind: EntityKind,
        index: usize,
        reason: String,
    },

    #[error("Import stopped after {} committed kind(s): {source}", .committed.len())]
    PartialImport {
        /// Entity kinds whose transaction committed before the failure.
        committed: Vec<EntityKind>,
        /// Counts for the kinds that were applied.
        stats: Box<crate::backup::ImportStats>,
        #[source]
        source: Box<Error>,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Holiday fetch failed: {0}")]
    HolidayFetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::EncodingError(err.to_string())
    }
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized | Self::AlreadyInitialized { .. } => ErrorCode::NotInitialized,
            Self::StorageUnavailable(_) => ErrorCode::StorageUnavailable,
            Self::EncodingError(_) => ErrorCode::EncodingError,
            Self::MalformedBackup(_) => ErrorCode::MalformedBackup,
            Self::DuplicateRecord { .. } => ErrorCode::DuplicateRecord,
            Self::RecordDecodeSkipped { .. } => ErrorCode::RecordDecodeSkipped,
            Self::PartialImport { .. } => ErrorCode::PartialImport,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::HolidayFetch(_) => ErrorCode::HolidayFetch,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => Some("Run `cj init` to create the database".to_string()),

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),

            Self::MalformedBackup(_) => Some(
                "A backup must be a JSON object with `eventData`, `calendarEventData` \
                 and `holidayData` arrays. Create one with `cj backup export`."
                    .to_string(),
            ),

            Self::DuplicateRecord { existing_id, .. } => Some(format!(
                "Change the title, times or color, or edit the existing record '{existing_id}'."
            )),

            Self::PartialImport { committed, .. } => {
                let kinds: Vec<String> = committed.iter().map(ToString::to_string).collect();
                Some(if kinds.is_empty() {
                    "Nothing was written. Retry the import.".to_string()
                } else {
                    format!(
                        "Already imported: {}. Re-run in upsert mode (it is idempotent) \
                         or pass `--atomic` to import all kinds in one transaction.",
                        kinds.join(", ")
                    )
                })
            }

            Self::NotFound { kind, .. } => Some(format!(
                "Use `cj {} list` to see available records.",
                kind.command_noun()
            )),

            Self::HolidayFetch(_) => Some(
                "Check the network or set CJ_HOLIDAY_ENDPOINT to a reachable endpoint."
                    .to_string(),
            ),

            Self::StorageUnavailable(_)
            | Self::EncodingError(_)
            | Self::RecordDecodeSkipped { .. }
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Io(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
