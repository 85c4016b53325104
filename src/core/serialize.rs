//! Typed rows → textual wire rows.

use crate::models::{COLUMN_COUNT, Column, RowSet, WireRow, Workshop};
use crate::store::{Sheet, SheetValue};
use crate::utils::date::format_wire;
use thiserror::Error;

/// Some dates could not be written as `DD/MM/YYYY`.
///
/// Carries a fallback where every date passes through unformatted, so the
/// caller can decide to save anyway or to stop.
#[derive(Debug, Clone, Error)]
#[error("{} row(s) carry dates that cannot be written as DD/MM/YYYY", rows.len())]
pub struct FormatWarning {
    /// Positions (0-based) of the offending rows.
    pub rows: Vec<usize>,
    pub fallback: Vec<WireRow>,
}

pub fn serialize(full: &RowSet) -> Result<Vec<WireRow>, FormatWarning> {
    serialize_rows(full.rows())
}

/// Serialize any sequence of rows (a filtered view, for instance).
pub fn serialize_rows<'a, I>(rows: I) -> Result<Vec<WireRow>, FormatWarning>
where
    I: IntoIterator<Item = &'a Workshop>,
    I::IntoIter: Clone,
{
    let rows = rows.into_iter();
    let mut out = Vec::new();
    let mut bad = Vec::new();

    for (pos, row) in rows.clone().enumerate() {
        let fecha = match row.date {
            None => String::new(),
            Some(d) => match format_wire(d) {
                Some(s) => s,
                None => {
                    bad.push(pos);
                    String::new()
                }
            },
        };
        out.push(to_wire(row, fecha));
    }

    if bad.is_empty() {
        return Ok(out);
    }

    log::warn!("{} date(s) out of range, falling back to raw dates", bad.len());
    let fallback = rows
        .map(|r| to_wire(r, r.date.map(|d| d.to_string()).unwrap_or_default()))
        .collect();

    Err(FormatWarning {
        rows: bad,
        fallback,
    })
}

/// Wire form of a row with an already formatted date.
fn to_wire(row: &Workshop, fecha: String) -> WireRow {
    let mut w = WireRow::default();
    for col in Column::ALL {
        if col != Column::Fecha {
            w.set(col, row.cell_text(col));
        }
    }
    w.fecha = fecha;
    w
}

/// Worksheet content for a set of wire rows.
pub fn to_sheet(rows: &[WireRow]) -> Sheet {
    Sheet {
        headers: Column::ALL.iter().map(|c| c.header().to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| {
                let mut cells = Vec::with_capacity(COLUMN_COUNT);
                for c in r.cells() {
                    cells.push(SheetValue::Text(c.to_string()));
                }
                cells
            })
            .collect(),
    }
}
