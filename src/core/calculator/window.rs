use crate::core::calculator::limits::WindowMode;
use crate::models::duty_entry::DutyStatusEntry;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

/// The instants an evaluation is anchored to, all normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationWindow {
    pub now: DateTime<Utc>,
    pub start_of_today: DateTime<Utc>,
    pub cycle_start: DateTime<Utc>,
}

impl EvaluationWindow {
    /// `now`'s own time zone decides where "today" begins.
    pub fn new<Tz: TimeZone>(now: &DateTime<Tz>, cycle_days: i64) -> Self {
        let now_utc = now.with_timezone(&Utc);
        Self {
            now: now_utc,
            start_of_today: start_of_day(now),
            cycle_start: Duration::try_days(cycle_days)
                .and_then(|d| now_utc.checked_sub_signed(d))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

/// Local midnight of `now`'s calendar date.
/// When midnight falls into a DST gap the day starts at the first valid hour.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Portion of `entry` that counts toward a window opening at `window_start`.
pub fn window_share(
    entry: &DutyStatusEntry,
    window_start: DateTime<Utc>,
    now: DateTime<Utc>,
    mode: WindowMode,
) -> Duration {
    match mode {
        WindowMode::StartTime => {
            if entry.start_time >= window_start {
                entry.duration()
            } else {
                Duration::zero()
            }
        }
        WindowMode::Clip => {
            let start = entry.start_time.max(window_start);
            let end = entry.end_time.min(now);
            (end - start).max(Duration::zero())
        }
    }
}
