use crate::errors::{AppError, AppResult};
use crate::models::duty_entry::DutyStatusEntry;
use crate::models::duty_status::DutyStatus;
use crate::models::hos_log::HosLog;
use crate::models::hos_status::{
    HosViolation, Severity, ViolationKind, ViolationRecord, ViolationState,
};
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ENTRY_COLUMNS: &str = "e.id, e.log_id, e.driver_id, e.status, e.start_time, e.end_time, \
                             e.note, e.source, e.created_at, l.log_date";

/// Canonical stored form: RFC 3339, UTC, whole seconds. Sorts lexicographically.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_ts(col: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(col, AppError::InvalidTimestamp(raw.to_string())))
}

pub fn map_entry_row(row: &Row) -> Result<DutyStatusEntry> {
    let status_str: String = row.get("status")?;
    let status = DutyStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidStatus(status_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    Ok(DutyStatusEntry {
        id: row.get("id")?,
        log_id: row.get("log_id")?,
        driver_id: row.get("driver_id")?,
        status,
        start_time: parse_db_ts(4, &start_str)?,
        end_time: parse_db_ts(5, &end_str)?,
        note: row.get("note")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

/// Id of the driver's log for `date`, creating it on first use.
pub fn find_or_create_log(conn: &Connection, driver_id: &str, date: &NaiveDate) -> AppResult<i64> {
    let date_str = date.format("%Y-%m-%d").to_string();

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM hos_logs WHERE driver_id = ?1 AND log_date = ?2",
            params![driver_id, date_str],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO hos_logs (driver_id, log_date, created_at) VALUES (?1, ?2, ?3)",
        params![driver_id, date_str, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert an entry into the log of its local start day. Returns the new id.
pub fn insert_entry(conn: &Connection, entry: &DutyStatusEntry) -> AppResult<i64> {
    let log_date = entry.start_local().date_naive();
    let log_id = find_or_create_log(conn, &entry.driver_id, &log_date)?;

    conn.execute(
        "INSERT INTO duty_entries (log_id, driver_id, status, start_time, end_time, note, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            log_id,
            entry.driver_id,
            entry.status.to_db_str(),
            ts_to_db(&entry.start_time),
            ts_to_db(&entry.end_time),
            entry.note,
            entry.source,
            entry.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// First stored entry of the same driver whose interval overlaps `entry`.
pub fn find_overlapping(conn: &Connection, entry: &DutyStatusEntry) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM duty_entries
             WHERE driver_id = ?1 AND start_time < ?3 AND end_time > ?2
             ORDER BY start_time ASC LIMIT 1",
            params![
                entry.driver_id,
                ts_to_db(&entry.start_time),
                ts_to_db(&entry.end_time)
            ],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Group rows (ordered by log date then start) into per-day logs.
fn collect_logs(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<HosLog>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        let log_date: String = row.get("log_date")?;
        Ok((log_date, map_entry_row(row)?))
    })?;

    let mut logs: Vec<HosLog> = Vec::new();
    for r in rows {
        let (log_date, entry) = r?;
        match logs.last_mut() {
            Some(log) if log.id == entry.log_id => log.entries.push(entry),
            _ => {
                let date = NaiveDate::parse_from_str(&log_date, "%Y-%m-%d")
                    .map_err(|_| AppError::InvalidDate(log_date.clone()))?;
                logs.push(HosLog {
                    id: entry.log_id,
                    driver_id: entry.driver_id.clone(),
                    log_date: date,
                    entries: vec![entry],
                });
            }
        }
    }
    Ok(logs)
}

/// Logs for a driver, optionally limited to an inclusive range of log dates.
pub fn load_logs(
    conn: &Connection,
    driver_id: &str,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<HosLog>> {
    let (from, to) = match range {
        Some((a, b)) => (a.format("%Y-%m-%d").to_string(), b.format("%Y-%m-%d").to_string()),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM duty_entries e
         JOIN hos_logs l ON l.id = e.log_id
         WHERE e.driver_id = ?1 AND l.log_date BETWEEN ?2 AND ?3
         ORDER BY l.log_date ASC, e.log_id ASC, e.start_time ASC"
    );
    collect_logs(conn, &sql, &[&driver_id, &from, &to])
}

/// Everything the calculator needs at an evaluation: entries still inside the
/// cycle window plus the driver's latest entry started by `now`.
pub fn load_logs_for_status(
    conn: &Connection,
    driver_id: &str,
    cycle_start: &DateTime<Utc>,
    now: &DateTime<Utc>,
) -> AppResult<Vec<HosLog>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM duty_entries e
         JOIN hos_logs l ON l.id = e.log_id
         WHERE e.driver_id = ?1
           AND (e.end_time >= ?2 OR e.id = (
                SELECT id FROM duty_entries WHERE driver_id = ?1 AND start_time <= ?3
                ORDER BY start_time DESC LIMIT 1))
         ORDER BY l.log_date ASC, e.log_id ASC, e.start_time ASC"
    );
    let since = ts_to_db(cycle_start);
    let until = ts_to_db(now);
    collect_logs(conn, &sql, &[&driver_id, &since, &until])
}

/// Entries of every driver (or one) whose log date falls in `range`.
pub fn load_entries_for_export(
    conn: &Connection,
    driver_id: Option<&str>,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<(String, DutyStatusEntry)>> {
    let (from, to) = match range {
        Some((a, b)) => (a.format("%Y-%m-%d").to_string(), b.format("%Y-%m-%d").to_string()),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };
    let driver = driver_id.unwrap_or("");

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM duty_entries e
         JOIN hos_logs l ON l.id = e.log_id
         WHERE (?1 = '' OR e.driver_id = ?1) AND l.log_date BETWEEN ?2 AND ?3
         ORDER BY e.driver_id ASC, e.start_time ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![driver, from, to], |row| {
        Ok((row.get::<_, String>("log_date")?, map_entry_row(row)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_drivers(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT driver_id FROM duty_entries ORDER BY driver_id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn driver_exists(conn: &Connection, driver_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM duty_entries WHERE driver_id = ?1 LIMIT 1")?;
    Ok(stmt.exists([driver_id])?)
}

// ---------------------------
// Violations
// ---------------------------

/// Store a violation unless the same kind is already recorded for that day.
/// Returns true when a new row was written.
pub fn record_violation(
    conn: &Connection,
    driver_id: &str,
    violation: &HosViolation,
    log_date: &NaiveDate,
) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO violations
            (driver_id, kind, description, severity, status, log_date, detected_at)
         VALUES (?1, ?2, ?3, ?4, 'open', ?5, ?6)",
        params![
            driver_id,
            violation.kind.to_db_str(),
            violation.description,
            violation.severity.to_db_str(),
            log_date.format("%Y-%m-%d").to_string(),
            ts_to_db(&violation.timestamp),
        ],
    )?;
    Ok(changed == 1)
}

fn map_violation_row(row: &Row) -> Result<ViolationRecord> {
    let kind_str: String = row.get("kind")?;
    let severity_str: String = row.get("severity")?;
    let status_str: String = row.get("status")?;

    Ok(ViolationRecord {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        kind: ViolationKind::from_db_str(&kind_str)
            .ok_or_else(|| conversion_error(2, AppError::Other(format!("unknown violation kind {kind_str}"))))?,
        description: row.get("description")?,
        severity: Severity::from_db_str(&severity_str)
            .ok_or_else(|| conversion_error(4, AppError::Other(format!("unknown severity {severity_str}"))))?,
        status: ViolationState::from_db_str(&status_str)
            .ok_or_else(|| conversion_error(5, AppError::Other(format!("unknown violation status {status_str}"))))?,
        log_date: row.get("log_date")?,
        detected_at: row.get("detected_at")?,
        resolved_at: row.get("resolved_at")?,
    })
}

pub fn load_violations(
    conn: &Connection,
    driver_id: &str,
    only_open: bool,
) -> AppResult<Vec<ViolationRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, driver_id, kind, description, severity, status, log_date, detected_at, resolved_at
         FROM violations
         WHERE driver_id = ?1 AND (?2 = 0 OR status = 'open')
         ORDER BY log_date ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![driver_id, only_open as i32], map_violation_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn resolve_violation(conn: &Connection, id: i64) -> AppResult<ViolationRecord> {
    conn.execute(
        "UPDATE violations SET status = 'resolved', resolved_at = ?2
         WHERE id = ?1 AND status = 'open'",
        params![id, Local::now().to_rfc3339()],
    )?;

    // Resolving twice is a no-op: the stored row is returned as is.
    let record = conn
        .query_row(
            "SELECT id, driver_id, kind, description, severity, status, log_date, detected_at, resolved_at
             FROM violations WHERE id = ?1",
            [id],
            map_violation_row,
        )
        .optional()?
        .ok_or(AppError::ViolationNotFound(id))?;

    Ok(record)
}
