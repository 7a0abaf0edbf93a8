use crate::cli::commands::status::{evaluation_instant, print_status};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::HosStatusCache;
use crate::core::status::StatusLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::hos_status::ComplianceStatus;
use crate::ui::messages::{header, info};
use crate::utils::colors::RESET;
use crate::utils::formatting::{describe_compliance, mins2readable};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Fleet { at } = cmd {
        let now = evaluation_instant(at)?;
        let pool = DbPool::new(&cfg.database)?;
        let mut cache = HosStatusCache::with_ttl_secs(cfg.status_cache_ttl_secs)?;

        let fleet = StatusLogic::fleet(&pool.conn, &now, &cfg.rules, &mut cache)?;
        if fleet.is_empty() {
            info("No drivers in the logbook.");
            return Ok(());
        }

        header(format!("Fleet @ {}", now.format("%Y-%m-%d %H:%M")));

        let mut table = Table::new(vec![
            Column::new("DRIVER", 8),
            Column::new("STATUS", 10),
            Column::new("DRIVE LEFT", 10),
            Column::new("DUTY LEFT", 9),
            Column::new("CYCLE LEFT", 10),
            Column::new("VIOLATIONS", 10),
        ])
        .with_separator(&cfg.separator_char);

        for s in &fleet {
            let (label, color) = describe_compliance(s.compliance_status);
            table.add_row(vec![
                s.driver_id.clone(),
                format!("{color}{label}{RESET}"),
                mins2readable(s.available_drive_time, false, false),
                mins2readable(s.available_on_duty_time, false, false),
                mins2readable(s.available_cycle_time, false, false),
                s.violations.len().to_string(),
            ]);
        }
        print!("{}", table.render());

        for s in fleet
            .iter()
            .filter(|s| s.compliance_status == ComplianceStatus::Violation)
        {
            print_status(s);
        }

        let count = |c: ComplianceStatus| fleet.iter().filter(|s| s.compliance_status == c).count();
        println!(
            "\n  Drivers: {} | compliant: {} | violation: {} | pending: {}",
            fleet.len(),
            count(ComplianceStatus::Compliant),
            count(ComplianceStatus::Violation),
            count(ComplianceStatus::Pending)
        );
    }
    Ok(())
}
