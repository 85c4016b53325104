//! Tabular store holding the worksheet: the system of record.
//!
//! A store exposes whole-worksheet `read` and `write`; there is no row-level
//! update and no locking, so concurrent sessions race and the last write wins.

pub mod audit;
pub mod cache;
pub mod csv_store;
pub mod migrate;
pub mod sqlite;

pub use audit::AuditEntry;
pub use cache::CachedStore;
pub use csv_store::CsvStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single cell as held by the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SheetValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Real(f64),
}

impl SheetValue {
    /// Text form of the cell, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SheetValue::Empty => None,
            SheetValue::Text(s) if s.is_empty() => None,
            SheetValue::Text(s) => Some(s.clone()),
            SheetValue::Integer(i) => Some(i.to_string()),
            SheetValue::Real(f) => Some(f.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for SheetValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            SheetValue::Empty
        } else {
            SheetValue::Text(s.to_string())
        }
    }
}

/// Worksheet content: header row plus data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<SheetValue>>,
}

impl Sheet {
    /// Keep only the first `columns` columns, padding short rows with
    /// empty cells.
    pub fn project(mut self, columns: usize) -> Self {
        self.headers.truncate(columns);
        let width = self.headers.len();
        for row in &mut self.rows {
            row.truncate(width);
            row.resize(width, SheetValue::Empty);
        }
        self
    }
}

pub trait SheetStore {
    /// Fetch the first `columns` columns of `worksheet`.
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet>;

    /// Replace the whole content of `worksheet`.
    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()>;

    /// Record an operation in the store's audit trail.
    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    /// Audit trail, most recent first.
    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>>;
}

impl<S: SheetStore + ?Sized> SheetStore for Box<S> {
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet> {
        (**self).read(worksheet, columns)
    }

    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()> {
        (**self).write(worksheet, sheet)
    }

    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        (**self).append_audit(operation, target, message)
    }

    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>> {
        (**self).audit_entries()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Csv,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Csv => "csv",
        }
    }
}

/// Open the configured backend.
pub fn open_store(backend: StoreBackend, location: &str) -> AppResult<Box<dyn SheetStore>> {
    log::debug!("opening {} store at {}", backend.as_str(), location);
    match backend {
        StoreBackend::Sqlite => Ok(Box::new(SqliteStore::open(location)?)),
        StoreBackend::Csv => Ok(Box::new(CsvStore::open(location)?)),
    }
}
