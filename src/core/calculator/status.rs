use crate::core::calculator::breaks::analyze_breaks;
use crate::core::calculator::limits::{HosLimits, HosRules, WindowMode};
use crate::core::calculator::window::{EvaluationWindow, window_share};
use crate::models::duty_entry::DutyStatusEntry;
use crate::models::duty_status::DutyStatus;
use crate::models::hos_log::HosLog;
use crate::models::hos_status::{
    ComplianceStatus, DriverHosStatus, HosViolation, Severity, ViolationKind,
};
use chrono::{DateTime, Duration, TimeZone};

/// Compute the compliance snapshot of one driver at the instant `now`.
///
/// Pure: the result depends only on `logs`, `now` and `rules`. The time zone
/// of `now` is the reference frame for "today".
pub fn calculate_hos_status<Tz: TimeZone>(
    driver_id: &str,
    logs: &[HosLog],
    now: &DateTime<Tz>,
    rules: &HosRules,
) -> DriverHosStatus {
    let limits = &rules.limits;
    let window = EvaluationWindow::new(now, limits.cycle_days);

    let mut entries: Vec<&DutyStatusEntry> =
        logs.iter().flat_map(|log| log.entries.iter()).collect();
    entries.sort_by_key(|e| e.start_time);

    // Entries that have not started yet are not history.
    if rules.window_mode == WindowMode::Clip {
        entries.retain(|e| e.start_time <= window.now);
    }

    if entries.is_empty() {
        return pending_status(driver_id, &window, limits);
    }

    let mut used_drive = Duration::zero();
    let mut used_on_duty = Duration::zero();
    let mut used_cycle = Duration::zero();

    for entry in entries.iter().filter(|e| e.status.is_on_duty()) {
        let today = window_share(entry, window.start_of_today, window.now, rules.window_mode);
        let cycle = window_share(entry, window.cycle_start, window.now, rules.window_mode);

        if entry.status.is_driving() {
            used_drive += today;
        }
        used_on_duty += today;
        used_cycle += cycle;
    }

    let used_drive = used_drive.num_minutes();
    let used_on_duty = used_on_duty.num_minutes();
    let used_cycle = used_cycle.num_minutes();

    // ---- 34-hour restart ----
    let last_on_duty_end = entries
        .iter()
        .filter(|e| e.status.is_on_duty())
        .map(|e| e.end_time)
        .max();
    let restart_available = match last_on_duty_end {
        None => true,
        Some(end) => window.now - end >= Duration::minutes(limits.restart_minutes),
    };

    // ---- 30-minute break ----
    let breaks = analyze_breaks(&entries, window.now, limits);

    // ---- Violations ----
    let mut violations = Vec::new();
    if used_drive >= limits.drive_minutes {
        violations.push(HosViolation::open(
            ViolationKind::ElevenHour,
            Severity::Major,
            window.now,
        ));
    }
    if used_on_duty >= limits.on_duty_minutes {
        violations.push(HosViolation::open(
            ViolationKind::FourteenHour,
            Severity::Major,
            window.now,
        ));
    }
    if used_cycle >= limits.cycle_minutes {
        violations.push(HosViolation::open(
            ViolationKind::SeventyHour,
            Severity::Major,
            window.now,
        ));
    }
    if rules.enforce_break
        && breaks
            .breach_at
            .is_some_and(|at| at >= window.start_of_today && at <= window.now)
    {
        violations.push(HosViolation::open(
            ViolationKind::ThirtyMinuteBreak,
            Severity::Minor,
            window.now,
        ));
    }

    let last = entries.last().copied();
    let compliance_status = if violations.is_empty() {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::Violation
    };

    DriverHosStatus {
        driver_id: driver_id.to_string(),
        evaluated_at: window.now,
        current_status: last.map_or(DutyStatus::OffDuty, |e| e.status),
        available_drive_time: (limits.drive_minutes - used_drive).max(0),
        available_on_duty_time: (limits.on_duty_minutes - used_on_duty).max(0),
        available_cycle_time: (limits.cycle_minutes - used_cycle).max(0),
        used_drive_time: used_drive,
        used_on_duty_time: used_on_duty,
        cycle_limit: limits.cycle_minutes,
        used_cycle_hours: used_cycle,
        drive_time_until_break: breaks.remaining(limits),
        restart_available,
        violations,
        last_logged_at: last.map(|e| e.end_time),
        compliance_status,
    }
}

/// Snapshot for a driver with no history yet.
fn pending_status(driver_id: &str, window: &EvaluationWindow, limits: &HosLimits) -> DriverHosStatus {
    DriverHosStatus {
        driver_id: driver_id.to_string(),
        evaluated_at: window.now,
        current_status: DutyStatus::OffDuty,
        available_drive_time: limits.drive_minutes,
        available_on_duty_time: limits.on_duty_minutes,
        available_cycle_time: limits.cycle_minutes,
        used_drive_time: 0,
        used_on_duty_time: 0,
        cycle_limit: limits.cycle_minutes,
        used_cycle_hours: 0,
        drive_time_until_break: limits.break_after_driving_minutes,
        restart_available: false,
        violations: Vec::new(),
        last_logged_at: None,
        compliance_status: ComplianceStatus::Pending,
    }
}
