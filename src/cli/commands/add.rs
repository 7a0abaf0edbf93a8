use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_entry::DutyStatusEntry;
use crate::models::duty_status::DutyStatus;
use crate::utils::time::parse_timestamp;

/// Record one duty status entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        driver,
        status,
        start,
        end,
        note,
    } = cmd
    {
        let status =
            DutyStatus::from_code(status).ok_or_else(|| AppError::InvalidStatus(status.clone()))?;
        let start = parse_timestamp(start)?;
        let end = parse_timestamp(end)?;

        let entry = DutyStatusEntry::new(driver, status, start, end)
            .with_note(note.clone())
            .with_source("cli");

        let mut pool = DbPool::new(&cfg.database)?;
        AddLogic::apply(&mut pool, entry)?;
    }

    Ok(())
}
