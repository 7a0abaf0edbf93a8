//! Bulk ingestion of daily logs from JSON.
//!
//! This is the deserialization boundary: timestamps, status names and
//! interval direction are validated here, and a file is imported entirely
//! or not at all.

use crate::core::add::AddLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_entry::DutyStatusEntry;
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::success;
use crate::utils::time::parse_timestamp;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct HosLogInput {
    pub driver_id: String,
    #[serde(default, alias = "entries")]
    pub logs: Vec<DutyEntryInput>,
}

#[derive(Debug, Deserialize)]
pub struct DutyEntryInput {
    pub status: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl DutyEntryInput {
    fn to_entry(&self, driver_id: &str) -> AppResult<DutyStatusEntry> {
        let status = DutyStatus::from_code(&self.status)
            .ok_or_else(|| AppError::InvalidStatus(self.status.clone()))?;
        let start = parse_timestamp(&self.start_time)?;
        let end = parse_timestamp(&self.end_time)?;

        let entry = DutyStatusEntry::new(driver_id, status, start, end)
            .with_note(self.note.clone())
            .with_source("import");
        entry.validate()?;
        Ok(entry)
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Parse and validate a JSON document (an array of logs, or a single log).
    pub fn parse(json: &str) -> AppResult<Vec<DutyStatusEntry>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let logs: Vec<HosLogInput> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };

        let mut entries = Vec::new();
        for (log_idx, log) in logs.iter().enumerate() {
            if log.driver_id.trim().is_empty() {
                return Err(AppError::InvalidDriver(format!(
                    "log #{} has an empty driver_id",
                    log_idx + 1
                )));
            }

            for (entry_idx, input) in log.logs.iter().enumerate() {
                let entry = input.to_entry(&log.driver_id).map_err(|e| {
                    AppError::InvalidEntry(format!(
                        "log #{} entry #{}: {e}",
                        log_idx + 1,
                        entry_idx + 1
                    ))
                })?;
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| {
            a.driver_id
                .cmp(&b.driver_id)
                .then(a.start_time.cmp(&b.start_time))
        });

        for pair in entries.windows(2) {
            if pair[0].driver_id == pair[1].driver_id && pair[0].overlaps(&pair[1]) {
                return Err(AppError::InvalidEntry(format!(
                    "entries of {} starting at {} and {} overlap",
                    pair[0].driver_id,
                    pair[0].start_time.to_rfc3339(),
                    pair[1].start_time.to_rfc3339()
                )));
            }
        }
        Ok(entries)
    }

    /// Import every entry of `file` in one transaction. Returns the count.
    pub fn apply(pool: &mut DbPool, file: &Path) -> AppResult<usize> {
        let content = fs::read_to_string(file)?;
        let entries = Self::parse(&content)?;

        let tx = pool.conn.transaction()?;
        for entry in &entries {
            AddLogic::insert_checked(&tx, entry)?;
        }
        tx.commit()?;

        audit(
            &pool.conn,
            "import",
            &file.to_string_lossy(),
            &format!("Imported {} duty entries", entries.len()),
        );
        success(format!(
            "Imported {} duty entries from {}",
            entries.len(),
            file.display()
        ));

        Ok(entries.len())
    }
}
