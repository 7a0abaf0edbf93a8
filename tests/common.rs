#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use hoslog::models::duty_entry::DutyStatusEntry;
use hoslog::models::duty_status::DutyStatus;
use hoslog::models::hos_log::HosLog;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DRIVER: &str = "DRV-1";

pub fn hos() -> Command {
    cargo_bin_cmd!("hoslog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hoslog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a test DB through the CLI.
pub fn init_db(db_path: &str) {
    hos()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add one entry through the CLI; timestamps are RFC 3339.
pub fn add(db_path: &str, driver: &str, status: &str, start: &str, end: &str) {
    hos()
        .args(["--db", db_path, "add", driver, status, start, end])
        .assert()
        .success();
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn entry(status: DutyStatus, start: &str, end: &str) -> DutyStatusEntry {
    DutyStatusEntry::new(DRIVER, status, ts(start), ts(end))
}

/// Wrap entries into a single log; the calculator does not care about grouping.
pub fn logs(entries: Vec<DutyStatusEntry>) -> Vec<HosLog> {
    let date = entries
        .first()
        .map(|e| e.start_time.date_naive())
        .unwrap_or_default();
    vec![HosLog::new(DRIVER, date, entries)]
}
