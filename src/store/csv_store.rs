//! Directory of CSV files, one per worksheet.

use super::{AuditEntry, Sheet, SheetStore, SheetValue};
use crate::errors::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const AUDIT_FILE: &str = "audit.csv";

pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn open(dir: &str) -> AppResult<Self> {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).map_err(AppError::connection)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn worksheet_path(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{worksheet}.csv"))
    }

    fn audit_path(&self) -> PathBuf {
        self.dir.join(AUDIT_FILE)
    }
}

impl SheetStore for CsvStore {
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet> {
        let path = self.worksheet_path(worksheet);
        if !path.exists() {
            return Err(AppError::Connection(format!(
                "worksheet '{worksheet}' not found in {}",
                self.dir.display()
            )));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(AppError::connection)?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(AppError::connection)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.map_err(AppError::connection)?;
            rows.push(rec.iter().map(SheetValue::from).collect());
        }

        log::debug!("read {} row(s) from {}", rows.len(), path.display());
        Ok(Sheet { headers, rows }.project(columns))
    }

    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()> {
        let path = self.worksheet_path(worksheet);
        let tmp = path.with_extension("csv.tmp");

        let mut wtr = csv::Writer::from_path(&tmp).map_err(AppError::connection)?;
        wtr.write_record(&sheet.headers)
            .map_err(AppError::connection)?;

        for row in &sheet.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|c| c.as_text().unwrap_or_default())
                .collect();
            wtr.write_record(&cells).map_err(AppError::connection)?;
        }
        wtr.flush().map_err(AppError::connection)?;
        drop(wtr);

        fs::rename(&tmp, &path).map_err(AppError::connection)?;
        log::debug!("wrote {} row(s) to {}", sheet.rows.len(), path.display());
        Ok(())
    }

    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let path = self.audit_path();
        let is_new = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(AppError::connection)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        wtr.serialize(AuditEntry::now(operation, target, message))
            .map_err(AppError::connection)?;
        wtr.flush().map_err(AppError::connection)?;
        Ok(())
    }

    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>> {
        let path = self.audit_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(AppError::connection)?;
        let mut out = Vec::new();
        for rec in rdr.deserialize() {
            out.push(rec.map_err(AppError::connection)?);
        }
        out.reverse();
        Ok(out)
    }
}
