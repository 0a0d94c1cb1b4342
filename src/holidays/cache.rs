//! Fetch-once holiday cache.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::source::HolidaySource;
use crate::error::Result;
use crate::model::{DATE_FORMAT, EntityKind, Holiday};
use crate::storage::SqliteStorage;

/// What [`populate_if_empty`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PopulateOutcome {
    /// The cache already held this many holidays; nothing was fetched.
    AlreadyCached { count: usize },
    /// The source was fetched and its holidays stored.
    Populated { inserted: usize, dropped: usize },
}

/// Fill the holiday cache from `source` if it is empty.
///
/// Entries whose date is not `yyyy-MM-dd` are dropped. The rest are sorted
/// by date and inserted in one transaction, leaving any holiday already
/// stored under the same date untouched. The store is written only after
/// the fetch completes.
///
/// # Errors
///
/// Returns `HolidayFetch` if the source fails and `StorageUnavailable` if
/// the write fails; in both cases the cache is unchanged.
pub async fn populate_if_empty<S: HolidaySource>(
    storage: &mut SqliteStorage,
    source: &S,
) -> Result<PopulateOutcome> {
    let count = storage.count(EntityKind::Holiday)?;
    if count > 0 {
        debug!(count, "Holiday cache already populated");
        return Ok(PopulateOutcome::AlreadyCached { count });
    }

    let raw = source.fetch_holidays().await?;
    let total = raw.len();

    let mut holidays: Vec<(NaiveDate, Holiday)> = raw
        .into_iter()
        .filter_map(|(date, name)| match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
            Ok(parsed) => Some((parsed, Holiday::new(parsed, name))),
            Err(_) => {
                warn!(date = %date, "Dropping holiday with unreadable date");
                None
            }
        })
        .collect();
    holidays.sort_by_key(|(date, _)| *date);
    let dropped = total - holidays.len();

    let inserted = storage.mutate("populate_holidays", |tx, ctx| {
        let mut stmt = tx.prepare(
            "INSERT INTO holidays (date, name) VALUES (?1, ?2)
             ON CONFLICT(date) DO NOTHING",
        )?;
        let mut inserted = 0;
        for (_, holiday) in &holidays {
            inserted += stmt.execute(rusqlite::params![holiday.date, holiday.name])?;
        }
        ctx.touch(EntityKind::Holiday, inserted);
        Ok(inserted)
    })?;

    info!(source = %source.describe(), inserted, dropped, "Populated holiday cache");
    Ok(PopulateOutcome::Populated { inserted, dropped })
}
