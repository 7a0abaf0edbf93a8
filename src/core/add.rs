use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{find_overlapping, insert_entry};
use crate::errors::{AppError, AppResult};
use crate::models::duty_entry::DutyStatusEntry;
use crate::ui::messages::success;
use crate::utils::time::format_local;
use rusqlite::Connection;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate and store one entry on an open connection.
    /// Shared by `add` and `import` (which wraps many calls in one transaction).
    pub fn insert_checked(conn: &Connection, entry: &DutyStatusEntry) -> AppResult<i64> {
        entry.validate()?;

        if let Some(existing) = find_overlapping(conn, entry)? {
            return Err(AppError::OverlappingEntry {
                driver: entry.driver_id.clone(),
                existing,
            });
        }

        insert_entry(conn, entry)
    }

    pub fn apply(pool: &mut DbPool, entry: DutyStatusEntry) -> AppResult<i64> {
        let id = Self::insert_checked(&pool.conn, &entry)?;

        let summary = format!(
            "{} {} → {} ({} min)",
            entry.status,
            format_local(&entry.start_time),
            format_local(&entry.end_time),
            entry.duration_minutes()
        );

        audit(&pool.conn, "add", &entry.driver_id, &summary);
        success(format!("Entry #{id} recorded for {}: {summary}", entry.driver_id));

        Ok(id)
    }
}
