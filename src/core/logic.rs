use crate::models::duty_status::DutyStatus;
use crate::models::hos_log::HosLog;
use std::collections::BTreeMap;

/// Per-day totals shown by `list`.
#[derive(Debug, Default)]
pub struct DaySummary {
    pub minutes_by_status: BTreeMap<&'static str, i64>,
    pub on_duty_minutes: i64,
    pub logged_minutes: i64,
    pub entries: usize,
}

impl DaySummary {
    pub fn minutes(&self, status: DutyStatus) -> i64 {
        self.minutes_by_status
            .get(status.to_db_str())
            .copied()
            .unwrap_or(0)
    }
}

pub struct Core;

impl Core {
    pub fn build_daily_summary(log: &HosLog) -> DaySummary {
        let mut summary = DaySummary {
            entries: log.entries.len(),
            ..DaySummary::default()
        };

        for entry in &log.entries {
            let mins = entry.duration_minutes();
            *summary
                .minutes_by_status
                .entry(entry.status.to_db_str())
                .or_insert(0) += mins;

            summary.logged_minutes += mins;
            if entry.status.is_on_duty() {
                summary.on_duty_minutes += mins;
            }
        }

        summary
    }
}
