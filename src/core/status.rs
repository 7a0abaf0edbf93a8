use crate::core::calculator::window::EvaluationWindow;
use crate::core::calculator::{HosRules, HosStatusCache, calculate_hos_status};
use crate::db::log::audit;
use crate::db::queries::{list_drivers, load_logs_for_status, record_violation};
use crate::errors::AppResult;
use crate::models::hos_status::DriverHosStatus;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::Connection;

pub struct StatusLogic;

impl StatusLogic {
    /// Load what the calculator needs for `driver_id` and evaluate it at `now`.
    pub fn evaluate<Tz: TimeZone>(
        conn: &Connection,
        driver_id: &str,
        now: &DateTime<Tz>,
        rules: &HosRules,
    ) -> AppResult<DriverHosStatus> {
        let window = EvaluationWindow::new(now, rules.limits.cycle_days);
        let logs = load_logs_for_status(conn, driver_id, &window.cycle_start, &window.now)?;
        Ok(calculate_hos_status(driver_id, &logs, now, rules))
    }

    /// Same as `evaluate`, going through a caller-owned cache.
    pub fn evaluate_cached<Tz: TimeZone>(
        conn: &Connection,
        driver_id: &str,
        now: &DateTime<Tz>,
        rules: &HosRules,
        cache: &mut HosStatusCache,
    ) -> AppResult<DriverHosStatus> {
        cache.get_or_compute(driver_id, now.with_timezone(&Utc), || {
            Self::evaluate(conn, driver_id, now, rules)
        })
    }

    /// Persist the snapshot's violations under `log_date`.
    /// Already recorded (driver, kind, day) triples are left untouched.
    pub fn record_violations(
        conn: &Connection,
        status: &DriverHosStatus,
        log_date: &NaiveDate,
    ) -> AppResult<usize> {
        let mut created = 0;
        for violation in &status.violations {
            if record_violation(conn, &status.driver_id, violation, log_date)? {
                created += 1;
                audit(
                    conn,
                    "violation",
                    &status.driver_id,
                    &format!("{} on {}", violation.description, log_date),
                );
            }
        }
        Ok(created)
    }

    /// Snapshot of every driver in the logbook.
    pub fn fleet<Tz: TimeZone>(
        conn: &Connection,
        now: &DateTime<Tz>,
        rules: &HosRules,
        cache: &mut HosStatusCache,
    ) -> AppResult<Vec<DriverHosStatus>> {
        let mut out = Vec::new();
        for driver in list_drivers(conn)? {
            out.push(Self::evaluate_cached(conn, &driver, now, rules, cache)?);
        }
        Ok(out)
    }
}
