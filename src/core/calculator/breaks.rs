//! 30-minute break requirement: driving is not allowed once 8 cumulative
//! hours of driving have passed without a 30-minute non-driving interruption.

use crate::core::calculator::limits::HosLimits;
use crate::models::duty_entry::DutyStatusEntry;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakInfo {
    /// Driving accumulated since the last qualifying interruption.
    pub driving_since_break: Duration,
    /// Instant at which driving most recently went past the allowance.
    pub breach_at: Option<DateTime<Utc>>,
}

impl BreakInfo {
    pub fn remaining(&self, limits: &HosLimits) -> i64 {
        (limits.break_after_driving_minutes - self.driving_since_break.num_minutes()).max(0)
    }
}

/// Walk `entries` (sorted by start) and track the driving run.
/// Unlogged gaps count as non-driving time.
pub fn analyze_breaks(
    entries: &[&DutyStatusEntry],
    now: DateTime<Utc>,
    limits: &HosLimits,
) -> BreakInfo {
    let allowance = Duration::minutes(limits.break_after_driving_minutes);
    let min_break = Duration::minutes(limits.break_minutes);

    let mut driving = Duration::zero();
    let mut rest_run = Duration::zero();
    let mut breach_at = None;
    let mut last_end: Option<DateTime<Utc>> = None;

    for entry in entries {
        if let Some(end) = last_end {
            rest_run += (entry.start_time - end).max(Duration::zero());
            if rest_run >= min_break {
                driving = Duration::zero();
            }
        }

        let span = (entry.end_time.min(now) - entry.start_time).max(Duration::zero());

        if entry.status.is_driving() {
            if driving <= allowance && driving + span > allowance {
                breach_at = Some(entry.start_time + (allowance - driving));
            }
            driving += span;
            rest_run = Duration::zero();
        } else {
            rest_run += span;
            if rest_run >= min_break {
                driving = Duration::zero();
            }
        }

        last_end = Some(last_end.map_or(entry.end_time, |end| end.max(entry.end_time)));
    }

    if let Some(end) = last_end {
        rest_run += (now - end).max(Duration::zero());
        if rest_run >= min_break {
            driving = Duration::zero();
        }
    }

    BreakInfo {
        driving_since_break: driving,
        breach_at,
    }
}
