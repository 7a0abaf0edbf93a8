use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::violations::ViolationLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::hos_status::{Severity, ViolationState};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, RED, RESET, YELLOW};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Violations {
        driver,
        open,
        resolve,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(id) = resolve {
            let record = ViolationLogic::resolve(&mut pool, *id)?;
            success(format!(
                "Violation #{} ({} on {}) for {} is resolved.",
                record.id,
                record.kind.to_db_str(),
                record.log_date,
                record.driver_id
            ));
            return Ok(());
        }

        let Some(driver) = driver else {
            return Ok(());
        };

        let records = ViolationLogic::list(&mut pool, driver, *open)?;
        if records.is_empty() {
            info(format!("No violations recorded for {driver}."));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 4),
            Column::new("DAY", 10),
            Column::new("TYPE", 12),
            Column::new("SEVERITY", 8),
            Column::new("STATE", 8),
            Column::new("DESCRIPTION", 11),
        ])
        .with_separator(&cfg.separator_char);

        for r in &records {
            let severity = match r.severity {
                Severity::Major => format!("{RED}{}{RESET}", r.severity.to_db_str()),
                Severity::Minor => format!("{YELLOW}{}{RESET}", r.severity.to_db_str()),
            };
            let state = match r.status {
                ViolationState::Open => format!("{RED}{}{RESET}", r.status.to_db_str()),
                ViolationState::Resolved => format!("{GREEN}{}{RESET}", r.status.to_db_str()),
            };
            table.add_row(vec![
                r.id.to_string(),
                r.log_date.clone(),
                r.kind.to_db_str().to_string(),
                severity,
                state,
                r.description.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
