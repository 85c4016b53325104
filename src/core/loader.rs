//! Worksheet → typed rows.

use crate::errors::{AppError, AppResult};
use crate::models::workshop::is_blank;
use crate::models::{COLUMN_COUNT, Column, Level, RowId, RowKey, RowSet, Shift, WireRow, Workshop};
use crate::store::{Sheet, SheetStore, SheetValue};
use crate::utils::date::{from_serial, parse_day_first};
use chrono::NaiveDate;

/// Fetch the whole worksheet and normalise it into a row set.
///
/// Any store failure aborts the load: the caller must not show partial
/// data. Unreadable cells never fail the load, they degrade to empty values.
pub fn load<S: SheetStore + ?Sized>(store: &mut S, worksheet: &str) -> AppResult<RowSet> {
    let sheet = store.read(worksheet, COLUMN_COUNT)?;
    check_headers(&sheet)?;

    let rows: Vec<Workshop> = sheet
        .rows
        .iter()
        .enumerate()
        .map(|(pos, cells)| {
            let mut w = row_from_cells(cells);
            w.key = Some(RowKey(pos));
            w
        })
        .collect();

    log::info!("loaded {} row(s) from '{}'", rows.len(), worksheet);
    Ok(RowSet::from_rows(rows))
}

fn check_headers(sheet: &Sheet) -> AppResult<()> {
    for col in Column::ALL {
        let found = sheet.headers.get(col.index()).map(|h| h.trim());
        if found.and_then(Column::from_header) != Some(col) {
            return Err(AppError::Connection(format!(
                "unexpected worksheet layout: column {} should be '{}', found '{}'",
                col.index() + 1,
                col.header(),
                found.unwrap_or("")
            )));
        }
    }
    Ok(())
}

/// Build a row from the nine cells of a worksheet line.
pub fn row_from_cells(cells: &[SheetValue]) -> Workshop {
    let cell = |c: Column| cells.get(c.index()).cloned().unwrap_or_default();

    Workshop {
        key: None,
        id: parse_id(&cell(Column::No)),
        code: text_cell(&cell(Column::Cct)),
        level: Level::from_sheet(&text_cell(&cell(Column::Nivel))),
        shift: Shift::from_sheet(&text_cell(&cell(Column::Turno))),
        facility_name: text_cell(&cell(Column::Plantel)),
        address: text_cell(&cell(Column::Direccion)),
        session_count: parse_count(&cell(Column::Sesiones)),
        workshop_name: workshop_name_cell(&cell(Column::Taller)),
        date: parse_date_cell(&cell(Column::Fecha)),
    }
}

/// Typed rows from wire rows (an imported CSV), with the same cell rules
/// as a worksheet load.
pub fn rows_from_wire(rows: &[WireRow]) -> Vec<Workshop> {
    rows.iter()
        .map(|w| {
            let cells: Vec<SheetValue> = w.cells().into_iter().map(SheetValue::from).collect();
            row_from_cells(&cells)
        })
        .collect()
}

fn parse_id(v: &SheetValue) -> Option<RowId> {
    match v {
        SheetValue::Empty => None,
        SheetValue::Integer(i) if *i >= 0 => Some(RowId::Number(*i as u64)),
        other => other.as_text().and_then(|t| RowId::parse(&t)),
    }
}

/// Session count; anything that is not a non-negative integer becomes
/// absent.
pub fn parse_count(v: &SheetValue) -> Option<u32> {
    let parsed = match v {
        SheetValue::Empty => None,
        SheetValue::Integer(i) => u32::try_from(*i).ok(),
        SheetValue::Real(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(*f as u32)
        }
        SheetValue::Real(_) => None,
        SheetValue::Text(t) => {
            let t = t.trim();
            t.parse::<u32>().ok().or_else(|| {
                t.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u32)
            })
        }
    };

    if parsed.is_none() && !v.is_empty() {
        log::debug!("unreadable session count {:?}, treated as empty", v);
    }
    parsed
}

/// Dates are read day-first; numbers are spreadsheet serial days.
pub fn parse_date_cell(v: &SheetValue) -> Option<NaiveDate> {
    let parsed = match v {
        SheetValue::Empty => None,
        SheetValue::Integer(i) => from_serial(*i as f64),
        SheetValue::Real(f) => from_serial(*f),
        SheetValue::Text(t) => parse_day_first(t),
    };

    if parsed.is_none() && !v.is_empty() {
        log::debug!("unreadable date {:?}, treated as empty", v);
    }
    parsed
}

/// Plain text column; numbers keep their decimal form ("123.0" → "123").
fn text_cell(v: &SheetValue) -> String {
    match v {
        SheetValue::Empty => String::new(),
        SheetValue::Text(t) if is_blank(t) => String::new(),
        SheetValue::Text(t) => t.clone(),
        SheetValue::Integer(i) => i.to_string(),
        SheetValue::Real(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        SheetValue::Real(f) => f.to_string(),
    }
}

/// The workshop name is always a string: numeric or missing source values
/// become empty so that the column never changes type on write.
fn workshop_name_cell(v: &SheetValue) -> String {
    match v {
        SheetValue::Text(t) if !is_blank(t) => t.clone(),
        _ => String::new(),
    }
}
