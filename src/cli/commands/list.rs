use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Core, DaySummary};
use crate::db::pool::DbPool;
use crate::db::queries::{driver_exists, load_logs};
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::hos_log::HosLog;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{describe_status, mins2readable};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { driver, period } = cmd {
        let range = resolve_period(period)?;
        let pool = DbPool::new(&cfg.database)?;
        if !driver_exists(&pool.conn, driver)? {
            return Err(AppError::NoEntriesForDriver(driver.clone()));
        }

        let logs = load_logs(&pool.conn, driver, range)?;

        if logs.is_empty() {
            info(format!("No entries for {driver} in the selected period."));
            return Ok(());
        }

        for log in &logs {
            let summary = Core::build_daily_summary(log);
            print_log(log, &summary, &cfg.separator_char);
        }
    }
    Ok(())
}

/// Default is the current month.
fn resolve_period(period: &Option<String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        Some(p) => date::parse_period(p).map_err(AppError::InvalidDate),
        None => Ok(Some(date::current_month_bounds())),
    }
}

fn print_log(log: &HosLog, summary: &DaySummary, separator: &str) {
    header(format!("{} @ {}", log.driver_id, log.date_str()));

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("STATUS", 20),
        Column::new("START", 5),
        Column::new("END", 5),
        Column::new("DURATION", 8),
        Column::new("NOTE", 4),
    ])
    .with_separator(separator);

    for e in &log.entries {
        let (label, color) = describe_status(e.status);
        table.add_row(vec![
            e.id.to_string(),
            format!("{color}{label}{RESET}"),
            e.start_local().format("%H:%M").to_string(),
            e.end_local().format("%H:%M").to_string(),
            mins2readable(e.duration_minutes(), false, false),
            colorize_optional(e.note.as_deref().unwrap_or("--")),
        ]);
    }
    print!("{}", table.render());

    let totals: Vec<String> = DutyStatus::ALL
        .iter()
        .map(|s| format!("{} {}", s.code(), mins2readable(summary.minutes(*s), false, true)))
        .collect();
    println!("  Totals: {}", totals.join(" | "));
    println!(
        "  On duty: {} | Logged: {} | Entries: {}",
        mins2readable(summary.on_duty_minutes, false, false),
        mins2readable(summary.logged_minutes, false, false),
        summary.entries
    );
}
