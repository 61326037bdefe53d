//! Unified application error type.
//! All modules (store, db, core, cli, session) return AppError to keep the
//! error handling consistent and easy to manage.

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
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Row (de)serialization error: {0}")]
    Row(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Form parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Session / authorization
    // ---------------------------
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    #[error("Not signed in. Run `opsboard login` first.")]
    NotSignedIn,

    #[error("Access denied. Only administrators can perform this action.")]
    AccessDenied,

    #[error("Session storage error: {0}")]
    Session(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
