//! Unified application error type.
//! All modules (store, core, grid, cli) return AppError to keep the error
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

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Remote store
    // ---------------------------
    /// The worksheet could not be fetched or written (unreachable,
    /// rejected, or its columns do not match the expected layout).
    #[error("Connection error: {0}")]
    Connection(String),

    // ---------------------------
    // Session
    // ---------------------------
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Operation not allowed: {0}")]
    Forbidden(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid grid file: {0}")]
    Grid(String),

    // ---------------------------
    // Save errors
    // ---------------------------
    #[error("Save blocked: {0} row(s) carry dates that cannot be written as DD/MM/YYYY")]
    FormatBlocked(usize),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

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

impl AppError {
    /// Wrap any backend failure as a connection error.
    pub fn connection<E: std::fmt::Display>(e: E) -> Self {
        AppError::Connection(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
