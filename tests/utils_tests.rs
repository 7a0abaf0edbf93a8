use chrono::NaiveDate;
use hoslog::errors::AppError;
use hoslog::models::duty_status::DutyStatus;
use hoslog::utils::date::parse_period;
use hoslog::utils::formatting::truncate_visible;
use hoslog::utils::mins2readable;
use hoslog::utils::table::{Column, Table, display_width};
use hoslog::utils::time::parse_timestamp;

mod common;
use common::ts;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

#[test]
fn periods_expand_to_inclusive_ranges() {
    assert_eq!(parse_period("all").unwrap(), None);
    assert_eq!(
        parse_period("2025").unwrap(),
        Some((d("2025-01-01"), d("2025-12-31")))
    );
    assert_eq!(
        parse_period("2024-02").unwrap(),
        Some((d("2024-02-01"), d("2024-02-29")))
    );
    assert_eq!(
        parse_period("2025-06-10").unwrap(),
        Some((d("2025-06-10"), d("2025-06-10")))
    );
    assert_eq!(
        parse_period("2025-05:2025-06-15").unwrap(),
        Some((d("2025-05-01"), d("2025-06-15")))
    );
    assert!(parse_period("2025-06:2025-05").is_err());
    assert!(parse_period("june").is_err());
}

#[test]
fn rfc3339_timestamps_keep_their_offset() {
    assert_eq!(
        parse_timestamp("2025-06-10T08:00:00+02:00").unwrap(),
        ts("2025-06-10T06:00:00Z")
    );
    assert!(parse_timestamp("2025-06-10 08:00").is_ok());
    assert!(parse_timestamp("2025-06-10T08:00:30").is_ok());
    assert!(matches!(
        parse_timestamp("10/06/2025 08:00"),
        Err(AppError::InvalidTimestamp(_))
    ));
}

#[test]
fn status_codes_and_names_are_accepted() {
    assert_eq!(DutyStatus::from_code("d"), Some(DutyStatus::Driving));
    assert_eq!(DutyStatus::from_code("ON"), Some(DutyStatus::OnDutyNotDriving));
    assert_eq!(DutyStatus::from_code("sleeper_berth"), Some(DutyStatus::SleeperBerth));
    assert_eq!(DutyStatus::from_code("off_duty"), Some(DutyStatus::OffDuty));
    assert_eq!(DutyStatus::from_db_str("on_duty"), Some(DutyStatus::OnDutyNotDriving));
    assert_eq!(DutyStatus::from_code("yard"), None);
}

#[test]
fn minutes_render_as_hours_and_minutes() {
    assert_eq!(mins2readable(150, false, false), "02h 30m");
    assert_eq!(mins2readable(-45, true, true), "-00:45");
    assert_eq!(mins2readable(660, true, true), "+11:00");
}

#[test]
fn table_pads_cells_ignoring_ansi_codes() {
    let mut table = Table::new(vec![Column::new("DRIVER", 4), Column::new("STATUS", 4)])
        .with_separator("=");
    table.add_row(vec!["DRV-1".into(), "\x1b[32mDriving\x1b[0m".into()]);

    let out = table.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].chars().all(|c| c == '='));
    assert_eq!(display_width(lines[0]), display_width(lines[2]));
}

#[test]
fn long_log_targets_are_shortened() {
    let long = "x".repeat(80);
    let cut = truncate_visible(&long, 60);
    assert_eq!(cut.chars().count(), 60);
    assert!(cut.ends_with("..."));
    assert_eq!(truncate_visible("add (DRV-1)", 60), "add (DRV-1)");
}
