//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that the CLI can
//! report every failure the same way.

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
    // Input validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Business rules
    // ---------------------------
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Month {month:02}/{year} is already locked for user {user}")]
    AlreadyLocked { user: String, year: i32, month: u32 },

    #[error("Month {month:02}/{year} is locked for user {user}")]
    MonthLocked { user: String, year: i32, month: u32 },

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("{0} not found")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export / import errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// True for duplicate-record failures, including a second lock on the
    /// same (user, year, month).
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_) | AppError::AlreadyLocked { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
