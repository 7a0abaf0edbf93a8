use super::duty_entry::DutyStatusEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// One driver's log for one local calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct HosLog {
    pub id: i64,
    pub driver_id: String,
    pub log_date: NaiveDate,
    pub entries: Vec<DutyStatusEntry>,
}

impl HosLog {
    pub fn new(driver_id: &str, log_date: NaiveDate, entries: Vec<DutyStatusEntry>) -> Self {
        Self {
            id: 0,
            driver_id: driver_id.to_string(),
            log_date,
            entries,
        }
    }

    pub fn date_str(&self) -> String {
        self.log_date.format("%Y-%m-%d").to_string()
    }
}
