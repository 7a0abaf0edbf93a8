// src/export/model.rs

use crate::models::duty_entry::DutyStatusEntry;
use crate::db::queries::ts_to_db;
use serde::Serialize;

/// Flat row shape shared by the CSV and JSON exports.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub driver_id: String,
    pub log_date: String,
    pub status: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub note: String,
    pub source: String,
}

impl EntryExport {
    pub fn from_entry(log_date: String, e: &DutyStatusEntry) -> Self {
        Self {
            id: e.id,
            driver_id: e.driver_id.clone(),
            log_date,
            status: e.status.to_db_str().to_string(),
            start_time: ts_to_db(&e.start_time),
            end_time: ts_to_db(&e.end_time),
            duration_minutes: e.duration_minutes(),
            note: e.note.clone().unwrap_or_default(),
            source: e.source.clone(),
        }
    }
}
