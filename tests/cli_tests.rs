use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add, hos, init_db, setup_test_db, temp_out};

// Local wall-clock times keep "today" stable whatever the host time zone.
const AT: &str = "2025-06-10 20:00";

fn long_day(db_path: &str) {
    add(db_path, "DRV-1", "ON", "2025-06-10 05:30", "2025-06-10 06:00");
    add(db_path, "DRV-1", "D", "2025-06-10 06:00", "2025-06-10 18:00");
}

#[test]
fn init_creates_the_database_and_logs_it() {
    let db_path = setup_test_db("cli_init");
    init_db(&db_path);
    assert!(fs::metadata(&db_path).is_ok());

    hos()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("migration_applied")));
}

#[test]
fn add_then_list_shows_the_day() {
    let db_path = setup_test_db("cli_add_list");
    init_db(&db_path);

    hos()
        .args([
            "--db",
            &db_path,
            "add",
            "DRV-1",
            "driving",
            "2025-06-10 06:00",
            "2025-06-10 08:30",
            "--note",
            "Reno",
        ])
        .assert()
        .success()
        .stdout(contains("Entry #1 recorded for DRV-1"));

    hos()
        .args(["--db", &db_path, "list", "DRV-1", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(
            contains("DRV-1 @ 2025-06-10")
                .and(contains("Reno"))
                .and(contains("02h 30m")),
        );
}

#[test]
fn list_of_an_unknown_driver_fails() {
    let db_path = setup_test_db("cli_list_unknown");
    init_db(&db_path);

    hos()
        .args(["--db", &db_path, "list", "NOBODY", "--period", "all"])
        .assert()
        .failure()
        .stderr(contains("No duty entries recorded for driver NOBODY"));
}

#[test]
fn reversed_interval_is_rejected() {
    let db_path = setup_test_db("cli_reversed");
    init_db(&db_path);

    hos()
        .args([
            "--db",
            &db_path,
            "add",
            "DRV-1",
            "D",
            "2025-06-10 10:00",
            "2025-06-10 09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Error: Invalid duty entry"));
}

#[test]
fn unknown_status_is_rejected() {
    let db_path = setup_test_db("cli_bad_status");
    init_db(&db_path);

    hos()
        .args([
            "--db",
            &db_path,
            "add",
            "DRV-1",
            "yard",
            "2025-06-10 09:00",
            "2025-06-10 10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid duty status: yard"));
}

#[test]
fn overlapping_entry_is_rejected() {
    let db_path = setup_test_db("cli_overlap");
    init_db(&db_path);
    add(&db_path, "DRV-1", "D", "2025-06-10 08:00", "2025-06-10 10:00");

    hos()
        .args([
            "--db",
            &db_path,
            "add",
            "DRV-1",
            "OFF",
            "2025-06-10 09:59",
            "2025-06-10 11:00",
        ])
        .assert()
        .failure()
        .stderr(contains("overlaps an existing entry"));
}

#[test]
fn status_json_reports_the_11_hour_violation() {
    let db_path = setup_test_db("cli_status_json");
    init_db(&db_path);
    long_day(&db_path);

    let output = hos()
        .args(["--db", &db_path, "status", "DRV-1", "--at", AT, "--json"])
        .output()
        .expect("run status");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(json["driver_id"], "DRV-1");
    assert_eq!(json["used_drive_time"], 720);
    assert_eq!(json["used_on_duty_time"], 750);
    assert_eq!(json["available_drive_time"], 0);
    assert_eq!(json["compliance_status"], "violation");
    assert_eq!(json["current_status"], "driving");

    let types: Vec<&str> = json["violations"]
        .as_array()
        .expect("violations")
        .iter()
        .filter_map(|v| v["type"].as_str())
        .collect();
    assert!(types.contains(&"11_hour"));
}

#[test]
fn status_of_a_new_driver_is_pending() {
    let db_path = setup_test_db("cli_status_pending");
    init_db(&db_path);

    hos()
        .args(["--db", &db_path, "status", "NEW-1", "--at", AT])
        .assert()
        .success()
        .stdout(contains("PENDING"));
}

#[test]
fn recorded_violations_can_be_listed_and_resolved() {
    let db_path = setup_test_db("cli_violations");
    init_db(&db_path);
    long_day(&db_path);

    hos()
        .args(["--db", &db_path, "status", "DRV-1", "--at", AT, "--record"])
        .assert()
        .success()
        .stdout(contains("2 violation(s) recorded for DRV-1"));

    // Recording the same day again adds nothing.
    hos()
        .args(["--db", &db_path, "status", "DRV-1", "--at", AT, "--record"])
        .assert()
        .success()
        .stdout(contains("No new violations to record."));

    hos()
        .args(["--db", &db_path, "violations", "DRV-1", "--open"])
        .assert()
        .success()
        .stdout(contains("11_hour").and(contains("30_min_break")));

    hos()
        .args(["--db", &db_path, "violations", "--resolve", "1"])
        .assert()
        .success()
        .stdout(contains("Violation #1 (11_hour on 2025-06-10)"));

    hos()
        .args(["--db", &db_path, "violations", "DRV-1", "--open"])
        .assert()
        .success()
        .stdout(contains("30_min_break").and(contains("11_hour").not()));

    hos()
        .args(["--db", &db_path, "violations", "--resolve", "42"])
        .assert()
        .failure()
        .stderr(contains("Violation not found: #42"));
}

#[test]
fn fleet_summarizes_every_driver() {
    let db_path = setup_test_db("cli_fleet");
    init_db(&db_path);
    long_day(&db_path);
    add(&db_path, "DRV-2", "D", "2025-06-10 08:00", "2025-06-10 10:00");

    hos()
        .args(["--db", &db_path, "fleet", "--at", AT])
        .assert()
        .success()
        .stdout(
            contains("DRV-1")
                .and(contains("DRV-2"))
                .and(contains("Drivers: 2 | compliant: 1 | violation: 1")),
        );
}

#[test]
fn import_loads_a_json_file() {
    let db_path = setup_test_db("cli_import");
    init_db(&db_path);

    let file = temp_out("cli_import", "json");
    fs::write(
        &file,
        r#"[{"driver_id": "DRV-7", "logs": [
            {"status": "on_duty_not_driving", "start_time": "2025-06-10 05:00", "end_time": "2025-06-10 06:00"},
            {"status": "driving", "start_time": "2025-06-10 06:00", "end_time": "2025-06-10 09:00"}
        ]}]"#,
    )
    .expect("write import file");

    hos()
        .args(["--db", &db_path, "import", &file])
        .assert()
        .success()
        .stdout(contains("Imported 2 duty entries"));

    hos()
        .args(["--db", &db_path, "status", "DRV-7", "--at", AT])
        .assert()
        .success()
        .stdout(contains("COMPLIANT"));

    fs::remove_file(&file).ok();
}

#[test]
fn export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    init_db(&db_path);
    long_day(&db_path);

    let csv_out = temp_out("cli_export", "csv");
    hos()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--driver", "DRV-1",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let csv = fs::read_to_string(&csv_out).expect("csv written");
    assert!(csv.starts_with("id,driver_id,log_date,status,start_time,end_time,duration_minutes,note,source"));
    assert!(csv.contains("driving"));
    assert_eq!(csv.lines().count(), 3);

    let json_out = temp_out("cli_export", "json");
    hos()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &json_out, "--range", "2025-06-10",
        ])
        .assert()
        .success();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("json written")).expect("valid JSON");
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[1]["duration_minutes"], 720);

    fs::remove_file(&csv_out).ok();
    fs::remove_file(&json_out).ok();
}

#[test]
fn export_requires_an_absolute_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db(&db_path);
    long_day(&db_path);

    hos()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn backup_copies_the_database() {
    let db_path = setup_test_db("cli_backup");
    init_db(&db_path);
    long_day(&db_path);

    let dest = temp_out("cli_backup", "sqlite");
    hos()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&dest).is_ok());

    fs::remove_file(&dest).ok();
}

#[test]
fn db_maintenance_commands() {
    let db_path = setup_test_db("cli_db");
    init_db(&db_path);
    long_day(&db_path);

    hos()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(
            contains("Integrity check passed")
                .and(contains("Drivers:"))
                .and(contains("4 migration(s)")),
        );

    hos()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("0 applied"));
}
