//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so error handling
//! stays consistent from storage up to the command dispatcher.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD HH:MM or RFC 3339)")]
    InvalidTimestamp(String),

    #[error("Invalid duty status: {0}")]
    InvalidStatus(String),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Logbook errors
    // ---------------------------
    #[error("Invalid duty entry: {0}")]
    InvalidEntry(String),

    #[error("Duty entry overlaps an existing entry for driver {driver} (entry #{existing})")]
    OverlappingEntry { driver: String, existing: i64 },

    #[error("Invalid driver id: {0}")]
    InvalidDriver(String),

    #[error("No duty entries recorded for driver {0}")]
    NoEntriesForDriver(String),

    #[error("Violation not found: #{0}")]
    ViolationNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
