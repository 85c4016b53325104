//! SQLite-backed worksheet store.

use super::migrate::run_pending_migrations;
use super::{AuditEntry, Sheet, SheetStore, SheetValue};
use crate::errors::{AppError, AppResult};
use crate::models::COLUMN_COUNT;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path)).map_err(AppError::connection)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::connection)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        run_pending_migrations(&conn).map_err(AppError::connection)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn read_inner(&self, worksheet: &str, columns: usize) -> rusqlite::Result<Option<Sheet>> {
        let headers_json: Option<String> = self
            .conn
            .query_row(
                "SELECT headers FROM worksheets WHERE name = ?1",
                [worksheet],
                |row| row.get(0),
            )
            .optional()?;

        let Some(headers_json) = headers_json else {
            return Ok(None);
        };

        let headers: Vec<String> = serde_json::from_str(&headers_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let mut stmt = self.conn.prepare(
            "SELECT c0, c1, c2, c3, c4, c5, c6, c7, c8
             FROM sheet_rows
             WHERE worksheet = ?1
             ORDER BY position ASC",
        )?;

        let rows = stmt.query_map([worksheet], |row| {
            let mut cells = Vec::with_capacity(COLUMN_COUNT);
            for i in 0..COLUMN_COUNT {
                cells.push(to_sheet_value(row.get::<_, Value>(i)?));
            }
            Ok(cells)
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }

        Ok(Some(
            Sheet {
                headers,
                rows: out,
            }
            .project(columns.min(COLUMN_COUNT)),
        ))
    }

    fn write_inner(&mut self, worksheet: &str, sheet: &Sheet) -> rusqlite::Result<()> {
        let headers_json = serde_json::to_string(&sheet.headers).map_err(|e| {
            rusqlite::Error::ToSqlConversionFailure(Box::new(e))
        })?;

        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM sheet_rows WHERE worksheet = ?1", [worksheet])?;
        tx.execute(
            "INSERT INTO worksheets (name, headers) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET headers = excluded.headers",
            params![worksheet, headers_json],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO sheet_rows (worksheet, position, c0, c1, c2, c3, c4, c5, c6, c7, c8)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;

            for (position, cells) in sheet.rows.iter().enumerate() {
                let mut values: Vec<Value> = vec![
                    Value::Text(worksheet.to_string()),
                    Value::Integer(position as i64),
                ];
                for i in 0..COLUMN_COUNT {
                    values.push(to_sql_value(cells.get(i)));
                }
                stmt.execute(params_from_iter(values))?;
            }
        }

        tx.commit()
    }
}

fn to_sheet_value(v: Value) -> SheetValue {
    match v {
        Value::Null => SheetValue::Empty,
        Value::Integer(i) => SheetValue::Integer(i),
        Value::Real(f) => SheetValue::Real(f),
        Value::Text(s) if s.is_empty() => SheetValue::Empty,
        Value::Text(s) => SheetValue::Text(s),
        Value::Blob(b) => SheetValue::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}

fn to_sql_value(v: Option<&SheetValue>) -> Value {
    match v {
        None | Some(SheetValue::Empty) => Value::Text(String::new()),
        Some(SheetValue::Text(s)) => Value::Text(s.clone()),
        Some(SheetValue::Integer(i)) => Value::Integer(*i),
        Some(SheetValue::Real(f)) => Value::Real(*f),
    }
}

impl SheetStore for SqliteStore {
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet> {
        match self.read_inner(worksheet, columns) {
            Ok(Some(sheet)) => {
                log::debug!("read {} row(s) from worksheet '{}'", sheet.rows.len(), worksheet);
                Ok(sheet)
            }
            Ok(None) => Err(AppError::Connection(format!(
                "worksheet '{worksheet}' not found"
            ))),
            Err(e) => Err(AppError::connection(e)),
        }
    }

    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()> {
        self.write_inner(worksheet, sheet)
            .map_err(AppError::connection)?;
        log::debug!("wrote {} row(s) to worksheet '{}'", sheet.rows.len(), worksheet);
        Ok(())
    }

    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let entry = AuditEntry::now(operation, target, message);

        let mut stmt = self
            .conn
            .prepare_cached(
                "INSERT INTO log (date, operation, target, message)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(AppError::connection)?;

        stmt.execute(params![entry.date, entry.operation, entry.target, entry.message])
            .map_err(AppError::connection)?;

        Ok(())
    }

    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT date, operation, IFNULL(target, ''), message
                 FROM log
                 ORDER BY id DESC",
            )
            .map_err(AppError::connection)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AuditEntry {
                    date: row.get(0)?,
                    operation: row.get(1)?,
                    target: row.get(2)?,
                    message: row.get(3)?,
                })
            })
            .map_err(AppError::connection)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(AppError::connection)?);
        }
        Ok(out)
    }
}
