use super::duty_status::DutyStatus;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DutyStatusEntry {
    pub id: i64,
    pub log_id: i64,                // ⇔ duty_entries.log_id (hos_logs.id)
    pub driver_id: String,          // ⇔ duty_entries.driver_id
    pub status: DutyStatus,         // ⇔ duty_entries.status
    pub start_time: DateTime<Utc>,  // ⇔ duty_entries.start_time (RFC 3339, UTC)
    pub end_time: DateTime<Utc>,    // ⇔ duty_entries.end_time (RFC 3339, UTC)
    pub note: Option<String>,       // ⇔ duty_entries.note
    pub source: String,             // ⇔ duty_entries.source ('cli' | 'import')
    pub created_at: String,         // ⇔ duty_entries.created_at (ISO8601)
}

impl DutyStatusEntry {
    /// Build a not-yet-stored entry (id and log_id are assigned on insert).
    pub fn new(
        driver_id: &str,
        status: DutyStatus,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            log_id: 0,
            driver_id: driver_id.to_string(),
            status,
            start_time,
            end_time,
            note: None,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Length of the interval, clamped at zero for reversed intervals.
    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time).max(Duration::zero())
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Ingestion check: a recorded interval must move forward in time.
    pub fn validate(&self) -> AppResult<()> {
        if self.driver_id.trim().is_empty() {
            return Err(AppError::InvalidDriver(self.driver_id.clone()));
        }
        if self.end_time <= self.start_time {
            return Err(AppError::InvalidEntry(format!(
                "end time {} is not after start time {}",
                self.end_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                self.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            )));
        }
        Ok(())
    }

    /// Half-open overlap test: touching intervals do not overlap.
    pub fn overlaps(&self, other: &DutyStatusEntry) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    pub fn start_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }

    pub fn end_local(&self) -> DateTime<Local> {
        self.end_time.with_timezone(&Local)
    }
}
