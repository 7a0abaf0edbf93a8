// src/export/logic.rs

use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_for_export;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EntryExport;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use crate::utils::path::expand_tilde;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export duty entries.
    ///
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `driver`: restrict to one driver, or all drivers
    /// - `range`: `None`, `"all"` or a period (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or `start:end` of those) matched on log date
    ///
    /// Returns the number of exported entries.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        driver: Option<&str>,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_period(r).map_err(AppError::InvalidDate)?,
        };

        let rows: Vec<EntryExport> = load_entries_for_export(&pool.conn, driver, bounds)?
            .into_iter()
            .map(|(log_date, entry)| EntryExport::from_entry(log_date, &entry))
            .collect();

        if rows.is_empty() {
            warning("No duty entries found for the selected filters.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} entries as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}
