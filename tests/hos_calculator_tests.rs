use chrono::{DateTime, FixedOffset, Utc};
use hoslog::models::duty_status::DutyStatus::{Driving, OffDuty, OnDutyNotDriving, SleeperBerth};
use hoslog::models::hos_status::{ComplianceStatus, Severity, ViolationKind};
use hoslog::{HosRules, calculate_hos_status};

mod common;
use common::{DRIVER, entry, logs, ts};

fn now(s: &str) -> DateTime<Utc> {
    ts(s)
}

#[test]
fn empty_history_is_pending() {
    let status = calculate_hos_status(DRIVER, &[], &now("2025-06-10T12:00:00Z"), &HosRules::default());

    assert_eq!(status.compliance_status, ComplianceStatus::Pending);
    assert!(!status.restart_available);
    assert!(status.violations.is_empty());
    assert_eq!(status.available_drive_time, 660);
    assert_eq!(status.available_on_duty_time, 840);
    assert_eq!(status.available_cycle_time, 4200);
    assert_eq!(status.used_drive_time, 0);
    assert_eq!(status.current_status, OffDuty);
    assert!(status.last_logged_at.is_none());
}

#[test]
fn twelve_hours_of_driving_breaks_the_11_hour_limit() {
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T18:00:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T20:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 720);
    assert_eq!(status.available_drive_time, 0);
    assert!(status.has_violation(ViolationKind::ElevenHour));
    assert_eq!(status.compliance_status, ComplianceStatus::Violation);

    let eleven = status
        .violations
        .iter()
        .find(|v| v.kind == ViolationKind::ElevenHour)
        .expect("11-hour violation");
    assert_eq!(eleven.severity, Severity::Major);
    assert!(!eleven.resolved);
    assert_eq!(eleven.timestamp, now("2025-06-10T20:00:00Z"));
}

#[test]
fn exactly_660_minutes_is_a_violation() {
    let data = logs(vec![
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T11:30:00Z"),
        entry(OffDuty, "2025-06-10T11:30:00Z", "2025-06-10T12:00:00Z"),
        entry(Driving, "2025-06-10T12:00:00Z", "2025-06-10T17:30:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T18:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 660);
    assert!(status.has_violation(ViolationKind::ElevenHour));
    assert!(!status.has_violation(ViolationKind::ThirtyMinuteBreak));
}

#[test]
fn one_minute_under_the_limit_is_compliant() {
    let data = logs(vec![
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T11:30:00Z"),
        entry(OffDuty, "2025-06-10T11:30:00Z", "2025-06-10T12:00:00Z"),
        entry(Driving, "2025-06-10T12:00:00Z", "2025-06-10T17:29:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T18:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 659);
    assert_eq!(status.available_drive_time, 1);
    assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn restart_after_35_hours_of_rest() {
    let data = logs(vec![entry(
        OnDutyNotDriving,
        "2025-06-09T05:00:00Z",
        "2025-06-09T09:00:00Z",
    )]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T20:00:00Z"), &HosRules::default());

    assert!(status.restart_available);
    assert_eq!(status.used_on_duty_time, 0);
    assert_eq!(status.used_cycle_hours, 240);
}

#[test]
fn no_restart_after_10_hours_of_rest() {
    let data = logs(vec![entry(
        OnDutyNotDriving,
        "2025-06-10T08:00:00Z",
        "2025-06-10T10:00:00Z",
    )]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T20:00:00Z"), &HosRules::default());

    assert!(!status.restart_available);
}

#[test]
fn off_duty_history_keeps_restart_available() {
    let data = logs(vec![entry(SleeperBerth, "2025-06-10T00:00:00Z", "2025-06-10T08:00:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T09:00:00Z"), &HosRules::default());

    assert!(status.restart_available);
    assert_eq!(status.current_status, SleeperBerth);
    assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn only_todays_share_of_a_midnight_entry_counts() {
    let data = logs(vec![
        entry(OnDutyNotDriving, "2025-06-02T08:00:00Z", "2025-06-02T10:00:00Z"),
        entry(Driving, "2025-06-09T22:00:00Z", "2025-06-10T02:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T12:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 120);
    assert_eq!(status.used_on_duty_time, 120);
    // The 8-day-old entry is out of the cycle; the straddling one counts whole.
    assert_eq!(status.used_cycle_hours, 240);
    assert_eq!(status.current_status, Driving);
    assert_eq!(status.last_logged_at, Some(ts("2025-06-10T02:00:00Z")));
}

#[test]
fn legacy_mode_drops_entries_that_straddle_midnight() {
    let data = logs(vec![
        entry(OnDutyNotDriving, "2025-06-02T08:00:00Z", "2025-06-02T10:00:00Z"),
        entry(Driving, "2025-06-09T22:00:00Z", "2025-06-10T02:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T12:00:00Z"), &HosRules::legacy());

    assert_eq!(status.used_drive_time, 0);
    assert_eq!(status.used_on_duty_time, 0);
    assert_eq!(status.used_cycle_hours, 240);
}

#[test]
fn entry_in_progress_is_clipped_at_now() {
    let data = logs(vec![entry(Driving, "2025-06-10T10:00:00Z", "2025-06-10T14:00:00Z")]);
    let at = now("2025-06-10T12:00:00Z");

    let clipped = calculate_hos_status(DRIVER, &data, &at, &HosRules::default());
    assert_eq!(clipped.used_drive_time, 120);

    let legacy = calculate_hos_status(DRIVER, &data, &at, &HosRules::legacy());
    assert_eq!(legacy.used_drive_time, 240);
}

#[test]
fn entries_starting_after_now_are_ignored() {
    let data = logs(vec![
        entry(OnDutyNotDriving, "2025-06-10T08:00:00Z", "2025-06-10T09:00:00Z"),
        entry(Driving, "2025-06-10T15:00:00Z", "2025-06-10T18:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T12:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 0);
    assert_eq!(status.used_on_duty_time, 60);
    assert_eq!(status.current_status, OnDutyNotDriving);
}

#[test]
fn today_follows_the_time_zone_of_now() {
    // 22:00-01:00 local at UTC-5; only the hour after local midnight is today.
    let data = logs(vec![entry(Driving, "2025-06-10T03:00:00Z", "2025-06-10T06:00:00Z")]);
    let offset = FixedOffset::west_opt(5 * 3600).expect("valid offset");
    let local_now = now("2025-06-10T15:00:00Z").with_timezone(&offset);

    let local = calculate_hos_status(DRIVER, &data, &local_now, &HosRules::default());
    assert_eq!(local.used_drive_time, 60);

    let utc = calculate_hos_status(DRIVER, &data, &now("2025-06-10T15:00:00Z"), &HosRules::default());
    assert_eq!(utc.used_drive_time, 180);
}

#[test]
fn fourteen_hours_on_duty_without_driving() {
    let data = logs(vec![entry(
        OnDutyNotDriving,
        "2025-06-10T05:00:00Z",
        "2025-06-10T19:00:00Z",
    )]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T20:00:00Z"), &HosRules::default());

    assert_eq!(status.used_on_duty_time, 840);
    assert!(status.has_violation(ViolationKind::FourteenHour));
    assert!(!status.has_violation(ViolationKind::ElevenHour));
    assert_eq!(status.available_on_duty_time, 0);
}

#[test]
fn seventy_hour_cycle_counts_only_the_trailing_week() {
    let mut entries = Vec::new();
    for day in 3..=10 {
        entries.push(entry(
            OnDutyNotDriving,
            &format!("2025-06-{day:02}T08:00:00Z"),
            &format!("2025-06-{day:02}T18:00:00Z"),
        ));
    }
    let status =
        calculate_hos_status(DRIVER, &logs(entries), &now("2025-06-10T20:00:00Z"), &HosRules::default());

    // June 3 ended before the cycle window opened.
    assert_eq!(status.used_cycle_hours, 7 * 600);
    assert_eq!(status.available_cycle_time, 0);
    assert!(status.has_violation(ViolationKind::SeventyHour));
    assert!(!status.has_violation(ViolationKind::FourteenHour));
    assert!(!status.restart_available);
}

#[test]
fn available_times_never_go_negative() {
    let data = logs(vec![entry(Driving, "2025-06-10T04:00:00Z", "2025-06-10T19:30:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T19:30:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 930);
    assert_eq!(status.available_drive_time, 0);
    assert_eq!(status.available_on_duty_time, 0);
    assert_eq!(status.drive_time_until_break, 0);
}

#[test]
fn evaluation_is_idempotent_for_a_fixed_instant() {
    let data = logs(vec![
        entry(OnDutyNotDriving, "2025-06-10T06:00:00Z", "2025-06-10T07:00:00Z"),
        entry(Driving, "2025-06-10T07:00:00Z", "2025-06-10T12:00:00Z"),
    ]);
    let at = now("2025-06-10T13:00:00Z");

    let a = calculate_hos_status(DRIVER, &data, &at, &HosRules::default());
    let b = calculate_hos_status(DRIVER, &data, &at, &HosRules::default());
    assert_eq!(a, b);
}

#[test]
fn adding_driving_today_never_lowers_drive_time() {
    let at = now("2025-06-10T20:00:00Z");
    let mut entries = vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T08:00:00Z")];
    let before = calculate_hos_status(DRIVER, &logs(entries.clone()), &at, &HosRules::default());

    entries.push(entry(Driving, "2025-06-10T09:00:00Z", "2025-06-10T10:15:00Z"));
    let after = calculate_hos_status(DRIVER, &logs(entries), &at, &HosRules::default());

    assert_eq!(before.used_drive_time, 120);
    assert_eq!(after.used_drive_time, 195);
    assert!(after.available_drive_time <= before.available_drive_time);
}

#[test]
fn reversed_entry_counts_as_zero() {
    let data = logs(vec![entry(Driving, "2025-06-10T10:00:00Z", "2025-06-10T09:00:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T12:00:00Z"), &HosRules::default());

    assert_eq!(status.used_drive_time, 0);
    assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn eight_and_a_half_hours_without_a_break() {
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T14:30:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T14:30:00Z"), &HosRules::default());

    assert!(status.has_violation(ViolationKind::ThirtyMinuteBreak));
    assert!(!status.has_violation(ViolationKind::ElevenHour));
    assert_eq!(status.drive_time_until_break, 0);

    let brk = status
        .violations
        .iter()
        .find(|v| v.kind == ViolationKind::ThirtyMinuteBreak)
        .expect("break violation");
    assert_eq!(brk.severity, Severity::Minor);
}

#[test]
fn a_30_minute_stop_resets_the_driving_run() {
    let data = logs(vec![
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T10:00:00Z"),
        entry(OffDuty, "2025-06-10T10:00:00Z", "2025-06-10T10:30:00Z"),
        entry(Driving, "2025-06-10T10:30:00Z", "2025-06-10T15:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T15:00:00Z"), &HosRules::default());

    assert!(!status.has_violation(ViolationKind::ThirtyMinuteBreak));
    assert_eq!(status.used_drive_time, 510);
    assert_eq!(status.drive_time_until_break, 480 - 270);
}

#[test]
fn an_unlogged_gap_counts_as_a_break() {
    let data = logs(vec![
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T10:00:00Z"),
        entry(Driving, "2025-06-10T10:45:00Z", "2025-06-10T15:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T15:00:00Z"), &HosRules::default());

    assert!(!status.has_violation(ViolationKind::ThirtyMinuteBreak));
}

#[test]
fn a_short_stop_does_not_reset_the_driving_run() {
    let data = logs(vec![
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T10:00:00Z"),
        entry(OnDutyNotDriving, "2025-06-10T10:00:00Z", "2025-06-10T10:15:00Z"),
        entry(Driving, "2025-06-10T10:15:00Z", "2025-06-10T14:45:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T14:45:00Z"), &HosRules::default());

    assert!(status.has_violation(ViolationKind::ThirtyMinuteBreak));
}

#[test]
fn a_break_missed_yesterday_is_not_reported_today() {
    let data = logs(vec![
        entry(Driving, "2025-06-09T14:00:00Z", "2025-06-09T23:00:00Z"),
        entry(OffDuty, "2025-06-09T23:00:00Z", "2025-06-10T06:00:00Z"),
        entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T08:00:00Z"),
    ]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T09:00:00Z"), &HosRules::default());

    assert!(!status.has_violation(ViolationKind::ThirtyMinuteBreak));
    assert_eq!(status.used_drive_time, 120);
    assert_eq!(status.drive_time_until_break, 480 - 120);
    assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn oversized_cycle_window_does_not_panic() {
    let mut rules = HosRules::default();
    rules.limits.cycle_days = 1_000_000_000;
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T08:00:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T09:00:00Z"), &rules);

    assert_eq!(status.used_cycle_hours, 120);
}

#[test]
fn legacy_rules_skip_the_break_check() {
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T14:30:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T14:30:00Z"), &HosRules::legacy());

    assert!(!status.has_violation(ViolationKind::ThirtyMinuteBreak));
    assert_eq!(status.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn violation_types_serialize_with_regulatory_names() {
    let data = logs(vec![entry(Driving, "2025-06-10T06:00:00Z", "2025-06-10T18:00:00Z")]);
    let status = calculate_hos_status(DRIVER, &data, &now("2025-06-10T20:00:00Z"), &HosRules::default());

    let json = serde_json::to_value(&status).expect("serializable");
    let types: Vec<&str> = json["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .filter_map(|v| v["type"].as_str())
        .collect();

    assert!(types.contains(&"11_hour"));
    assert!(types.contains(&"30_min_break"));
    assert_eq!(json["compliance_status"], "violation");
    assert_eq!(json["current_status"], "driving");
}
