//! Database schema definitions.
//!
//! Three tables, one per entity kind. Calendar event date-times are stored
//! as `YYYY-MM-DDTHH:MM:SS` text so lexical order is chronological order;
//! template times keep the literal `HH:mm:ss` string they were given.

use rusqlite::{Connection, Result};

/// Current schema version for migration tracking.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// The complete SQL schema for the caljournal database.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

-- Event templates: reusable time-of-day definitions
CREATE TABLE IF NOT EXISTS event_templates (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    memo TEXT,
    all_day INTEGER NOT NULL DEFAULT 0,
    color BLOB,
    sort_order INTEGER NOT NULL DEFAULT 0
);

-- Calendar events: concrete, dated entries
CREATE TABLE IF NOT EXISTS calendar_events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    start_at TEXT NOT NULL,
    end_at TEXT NOT NULL,
    memo TEXT,
    all_day INTEGER NOT NULL DEFAULT 0,
    color BLOB,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_calendar_events_start ON calendar_events(start_at);

-- Holidays: remote lookup cache keyed by yyyy-MM-dd
CREATE TABLE IF NOT EXISTS holidays (
    date TEXT PRIMARY KEY,
    name TEXT NOT NULL
);
";

/// Apply the schema and pending migrations to a connection.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    conn.execute_batch(SCHEMA_SQL)?;

    super::migrations::run_migrations(conn)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![
            format!("v{CURRENT_SCHEMA_VERSION}"),
            chrono::Utc::now().timestamp_millis()
        ],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Failed to apply schema");

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"event_templates".to_string()));
        assert!(tables.contains(&"calendar_events".to_string()));
        assert!(tables.contains(&"holidays".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        apply_schema(&conn).expect("First apply failed");
        apply_schema(&conn).expect("Second apply failed");
    }

    #[test]
    fn test_holiday_date_is_primary_key() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO holidays (date, name) VALUES ('2025-01-01', 'New Year')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO holidays (date, name) VALUES ('2025-01-01', 'Again')",
            [],
        );
        assert!(result.is_err());
    }
}
