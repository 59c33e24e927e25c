//! Versioned schema setup for the cache and record databases.
//!
//! The applied version lives in `PRAGMA user_version`, so a database carries
//! no bookkeeping table of its own.

use tokio_rusqlite::Connection;

use crate::Error;

/// One schema step, applied at most once per database.
pub(crate) struct Migration {
    pub(crate) version: i64,
    pub(crate) sql: &'static str,
}

pub(crate) const CACHE: &[Migration] =
    &[Migration { version: 1, sql: include_str!("../migrations/cache/001_geocodes.sql") }];

pub(crate) const RECORDS: &[Migration] =
    &[Migration { version: 1, sql: include_str!("../migrations/records/001_records.sql") }];

/// Apply every step newer than the database's version in one transaction.
///
/// Returns the schema version after applying.
///
/// # Errors
///
/// Returns `Error::MigrationFailed` naming the step that failed; nothing from
/// the failed run is kept.
pub(crate) async fn apply(conn: &Connection, steps: &'static [Migration]) -> Result<i64, Error> {
    conn.call(move |conn| -> Result<i64, Error> {
        let tx = conn.transaction()?;
        let current: i64 = tx.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        let mut version = current;
        for step in steps.iter().filter(|s| s.version > current) {
            tx.execute_batch(step.sql)
                .map_err(|e| Error::MigrationFailed(format!("version {}: {e}", step.version)))?;
            version = step.version;
        }

        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        if version > current {
            tracing::debug!(from = current, to = version, "schema migrated");
        }
        Ok(version)
    })
    .await
    .map_err(Error::from)
}
