use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::hos_status::DriverHosStatus;
use crate::ui::messages::{field, header, info, success};
use crate::utils::colors::{RESET, color_for_remaining};
use crate::utils::formatting::{describe_compliance, describe_status, mins2readable};
use crate::utils::time::{format_local, parse_timestamp};
use chrono::{DateTime, Local};

/// Below this many minutes a remaining allowance is shown in yellow.
const WARN_BELOW: i64 = 60;

/// Resolve `--at`, defaulting to the system clock.
pub(crate) fn evaluation_instant(at: &Option<String>) -> AppResult<DateTime<Local>> {
    match at {
        Some(s) => Ok(parse_timestamp(s)?.with_timezone(&Local)),
        None => Ok(Local::now()),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status {
        driver,
        at,
        json,
        record,
    } = cmd
    {
        let now = evaluation_instant(at)?;
        let pool = DbPool::new(&cfg.database)?;
        let status = StatusLogic::evaluate(&pool.conn, driver, &now, &cfg.rules)?;

        audit(
            &pool.conn,
            "status",
            driver,
            &format!(
                "{} at {}",
                status.compliance_status.as_str(),
                format_local(&status.evaluated_at)
            ),
        );

        if *json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            print_status(&status);
        }

        if *record {
            let created =
                StatusLogic::record_violations(&pool.conn, &status, &now.date_naive())?;
            // Keep stdout parseable when --json is set.
            if !*json {
                if created > 0 {
                    success(format!("{created} violation(s) recorded for {driver}"));
                } else {
                    info("No new violations to record.");
                }
            }
        }
    }
    Ok(())
}

fn remaining(mins: i64) -> String {
    format!(
        "{}{}{}",
        color_for_remaining(mins, WARN_BELOW),
        mins2readable(mins, false, false),
        RESET
    )
}

pub(crate) fn print_status(s: &DriverHosStatus) {
    header(format!("{} @ {}", s.driver_id, format_local(&s.evaluated_at)));

    let (label, color) = describe_compliance(s.compliance_status);
    field("Compliance", format!("{color}{label}{RESET}"));

    let (status_label, status_color) = describe_status(s.current_status);
    field("Current status", format!("{status_color}{status_label}{RESET}"));
    field(
        "Last logged",
        s.last_logged_at
            .as_ref()
            .map(format_local)
            .unwrap_or_else(|| "--".to_string()),
    );

    field(
        "Driving (11h)",
        format!(
            "{} used, {} left",
            mins2readable(s.used_drive_time, false, false),
            remaining(s.available_drive_time)
        ),
    );
    field(
        "On duty (14h)",
        format!(
            "{} used, {} left",
            mins2readable(s.used_on_duty_time, false, false),
            remaining(s.available_on_duty_time)
        ),
    );
    field(
        "Cycle",
        format!(
            "{} of {} used, {} left",
            mins2readable(s.used_cycle_hours, false, false),
            mins2readable(s.cycle_limit, false, false),
            remaining(s.available_cycle_time)
        ),
    );
    field("Until 30-min break", remaining(s.drive_time_until_break));
    field(
        "34h restart",
        if s.restart_available { "available" } else { "no" },
    );

    if s.violations.is_empty() {
        field("Violations", "none");
    } else {
        for v in &s.violations {
            field(
                "Violation",
                format!(
                    "[{}] {} at {}",
                    v.severity.to_db_str(),
                    v.description,
                    format_local(&v.timestamp)
                ),
            );
        }
    }
}
