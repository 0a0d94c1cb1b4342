//! Database migrations embedded at compile time.
//!
//! Migrations are sourced from `/migrations/` at the crate root and
//! embedded into the binary using `include_str!`.

use rusqlite::{Connection, Result};
use tracing::info;

/// A single migration with version identifier and SQL content.
struct Migration {
    version: &'static str,
    sql: &'static str,
}

/// All migrations in order, embedded at compile time.
///
/// Version names match the SQL filenames (without .sql extension).
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001_calendar_event_identity_index",
        sql: include_str!("../../migrations/001_calendar_event_identity_index.sql"),
    },
    Migration {
        version: "002_template_sort_order_index",
        sql: include_str!("../../migrations/002_template_sort_order_index.sql"),
    },
];

/// Run all pending migrations on the database.
///
/// Already-applied migrations (tracked in `schema_migrations`) are skipped,
/// so this is safe to call on every open.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let applied: std::collections::HashSet<String> = conn
        .prepare("SELECT version FROM schema_migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    for migration in MIGRATIONS {
        if applied.contains(migration.version) {
            continue;
        }

        info!(version = migration.version, "Applying migration");

        conn.execute_batch(migration.sql)?;

        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, chrono::Utc::now().timestamp_millis()],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::SCHEMA_SQL;

    fn setup_db(conn: &Connection) {
        conn.execute_batch(SCHEMA_SQL).expect("Base schema should apply");
    }

    fn recorded(conn: &Connection) -> i32 {
        conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_run_migrations_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        setup_db(&conn);
        run_migrations(&conn).expect("Migrations should apply to fresh database");
        assert_eq!(recorded(&conn), 2);
    }

    #[test]
    fn test_run_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        setup_db(&conn);

        run_migrations(&conn).expect("First run should succeed");
        run_migrations(&conn).expect("Second run should succeed (idempotent)");
        assert_eq!(recorded(&conn), 2);
    }

    #[test]
    fn test_existing_indexes_are_recorded_not_rebuilt() {
        let conn = Connection::open_in_memory().unwrap();
        setup_db(&conn);
        for migration in MIGRATIONS {
            conn.execute_batch(migration.sql).unwrap();
        }

        run_migrations(&conn).expect("Indexes created out of band should not fail");
        assert_eq!(recorded(&conn), 2);
    }
}
