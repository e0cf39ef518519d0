//! Unified application error type.
//! All modules (db, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Date-argument validation
    // ---------------------------
    #[error("Invalid date format '{0}'. Please use the format MM/DD/YY.")]
    InvalidDateFormat(String),

    #[error("Invalid date '{0}'. Please use a valid date.")]
    InvalidDate(String),

    #[error("Invalid date '{0}'. You can only check out for dates up to today.")]
    FutureDate(String),

    #[error("Invalid date '{0}'. You can only check out for dates up to {1} days ago.")]
    TooOld(String, i64),

    #[error("Start date cannot be after end date.")]
    StartAfterEnd,

    // ---------------------------
    // Check-in / check-out state
    // ---------------------------
    #[error("You have already checked in today.")]
    AlreadyCheckedIn,

    #[error("You have already checked out.")]
    AlreadyCheckedOut,

    #[error("You have not checked in yet. Please check in first before checking out.")]
    NotCheckedIn,

    #[error("A checkout needs a work summary. Please add a note.")]
    EmptyNote,

    // ---------------------------
    // Roster / identity
    // ---------------------------
    #[error("No organization given. Pass --org or set default_org in the configuration.")]
    MissingOrganization,

    #[error("Unknown organization: {0}")]
    UnknownOrganization(String),

    #[error("Unknown person: {0}")]
    UnknownPerson(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for caller-input and expected state-conflict outcomes.
    /// These are surfaced verbatim to the user and never treated as
    /// system faults; everything else is infrastructure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDateFormat(_)
                | AppError::InvalidDate(_)
                | AppError::FutureDate(_)
                | AppError::TooOld(_, _)
                | AppError::StartAfterEnd
                | AppError::AlreadyCheckedIn
                | AppError::AlreadyCheckedOut
                | AppError::NotCheckedIn
                | AppError::EmptyNote
                | AppError::MissingOrganization
                | AppError::UnknownOrganization(_)
                | AppError::UnknownPerson(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
