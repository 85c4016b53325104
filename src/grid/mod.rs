//! Editable grid, rendered as a CSV file.
//!
//! The grid file starts with a `_key` column that ties each line back to the
//! row it was generated from, followed by the nine worksheet columns. Reading
//! the file back applies the grid's rules: per-column permissions by role,
//! option and type constraints, and (for non-admin roles) no insertions and
//! no deletions.

pub mod editor;

use crate::core::filter::View;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{Column, Level, RowKey, RowSet, Shift, Workshop};
use crate::utils::date::parse_day_first;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub use editor::open_in_editor;

pub const KEY_HEADER: &str = "_key";

/// An edit the grid refused or adjusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIssue {
    /// Line in the grid file (header is line 1), 0 when the issue is not
    /// tied to a line.
    pub line: usize,
    pub column: Option<Column>,
    pub message: String,
}

impl fmt::Display for GridIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}", self.line)?;
        } else {
            f.write_str("grid")?;
        }
        match self.column {
            Some(c) => write!(f, " [{}]: {}", c.header(), self.message),
            None => write!(f, ": {}", self.message),
        }
    }
}

/// Result of reading back an edited grid.
#[derive(Debug, Clone, Default)]
pub struct GridEdit {
    pub rows: Vec<Workshop>,
    pub issues: Vec<GridIssue>,
}

/// Write the visible rows to `path`.
pub fn write_grid(path: &Path, full: &RowSet, view: &View) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![KEY_HEADER];
    header.extend(Column::ALL.iter().map(|c| c.header()));
    wtr.write_record(&header)?;

    for row in view.rows(full) {
        let mut rec = vec![row.key.map(|k| k.to_string()).unwrap_or_default()];
        rec.extend(Column::ALL.iter().map(|c| row.cell_text(*c)));
        wtr.write_record(&rec)?;
    }

    wtr.flush()?;
    log::debug!("grid with {} row(s) written to {}", view.len(), path.display());
    Ok(())
}

struct Layout {
    key: usize,
    columns: [usize; 9],
}

fn layout(headers: &csv::StringRecord) -> AppResult<Layout> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
    };

    let key = find(KEY_HEADER)
        .ok_or_else(|| AppError::Grid(format!("missing '{KEY_HEADER}' column")))?;

    let mut columns = [0usize; 9];
    for col in Column::ALL {
        columns[col.index()] = find(col.header())
            .ok_or_else(|| AppError::Grid(format!("missing '{}' column", col.header())))?;
    }

    Ok(Layout { key, columns })
}

/// Read an edited grid file and apply the grid rules for `session`.
pub fn read_grid(path: &Path, full: &RowSet, view: &View, session: &Session) -> AppResult<GridEdit> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::Grid(e.to_string()))?;

    let lay = layout(rdr.headers().map_err(|e| AppError::Grid(e.to_string()))?)?;
    let role = session.role;

    let mut issues = Vec::new();
    let mut edited: HashMap<RowKey, Workshop> = HashMap::new();
    // file order, for roles allowed to insert/delete
    let mut ordered: Vec<Workshop> = Vec::new();

    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| AppError::Grid(e.to_string()))?;
        let line = idx + 2;
        let cell = |col: Column| rec.get(lay.columns[col.index()]).unwrap_or("").trim();

        if Column::ALL.iter().all(|c| cell(*c).is_empty()) {
            continue;
        }

        let key = rec
            .get(lay.key)
            .and_then(|k| k.trim().parse::<usize>().ok())
            .map(RowKey)
            .filter(|k| view.contains(*k) && !edited.contains_key(k));

        match key.and_then(|k| full.get(k)) {
            Some(original) => {
                let mut row = original.clone();
                for col in Column::ALL {
                    let raw = cell(col);
                    if raw == original.cell_text(col).trim() {
                        continue;
                    }
                    if !role.can_edit(col) {
                        issues.push(GridIssue {
                            line,
                            column: Some(col),
                            message: format!("read-only for role {role}, edit ignored"),
                        });
                        continue;
                    }
                    if let Err(message) = apply_cell(&mut row, col, raw) {
                        issues.push(GridIssue {
                            line,
                            column: Some(col),
                            message,
                        });
                    }
                }
                if let Some(k) = row.key {
                    edited.insert(k, row.clone());
                }
                ordered.push(row);
            }
            None => {
                if !role.can_insert_rows() {
                    issues.push(GridIssue {
                        line,
                        column: None,
                        message: format!("rows cannot be added by role {role}, line ignored"),
                    });
                    continue;
                }

                let mut row = Workshop::default();
                for col in Column::ALL {
                    let raw = cell(col);
                    if raw.is_empty() {
                        continue;
                    }
                    if col == Column::No {
                        issues.push(GridIssue {
                            line,
                            column: Some(col),
                            message: "ids are assigned on save, value ignored".into(),
                        });
                        continue;
                    }
                    if let Err(message) = apply_cell(&mut row, col, raw) {
                        issues.push(GridIssue {
                            line,
                            column: Some(col),
                            message,
                        });
                    }
                }
                ordered.push(row);
            }
        }
    }

    let rows = if role.can_delete_rows() {
        ordered
    } else {
        // no insertions, no deletions: the view itself, with edits applied
        let mut out = Vec::with_capacity(view.len());
        for original in view.rows(full) {
            let Some(k) = original.key else { continue };
            match edited.remove(&k) {
                Some(row) => out.push(row),
                None => {
                    issues.push(GridIssue {
                        line: 0,
                        column: None,
                        message: format!(
                            "row {} cannot be deleted by role {role}, restored",
                            original.cell_text(Column::No)
                        ),
                    });
                    out.push(original.clone());
                }
            }
        }
        out
    };

    for issue in &issues {
        log::debug!("grid: {issue}");
    }

    Ok(GridEdit { rows, issues })
}

/// Parse `raw` into `column` of `row`, enforcing the grid's constraints.
fn apply_cell(row: &mut Workshop, column: Column, raw: &str) -> Result<(), String> {
    match column {
        Column::No => return Err("ids cannot be edited".into()),
        Column::Cct => row.code = raw.to_string(),
        Column::Plantel => row.facility_name = raw.to_string(),
        Column::Direccion => row.address = raw.to_string(),
        Column::Taller => row.workshop_name = raw.to_string(),
        Column::Nivel => {
            row.level = if raw.is_empty() {
                None
            } else {
                Some(Level::from_option(raw).ok_or_else(|| {
                    format!("'{raw}' is not a level option ({})", options(&Level::OPTIONS))
                })?)
            }
        }
        Column::Turno => {
            row.shift = if raw.is_empty() {
                None
            } else {
                Some(Shift::from_option(raw).ok_or_else(|| {
                    format!("'{raw}' is not a shift option ({})", options(&Shift::OPTIONS))
                })?)
            }
        }
        Column::Sesiones => {
            row.session_count = if raw.is_empty() {
                None
            } else {
                Some(
                    raw.parse::<u32>()
                        .map_err(|_| format!("'{raw}' is not a whole number of sessions"))?,
                )
            }
        }
        Column::Fecha => {
            row.date = if raw.is_empty() {
                None
            } else {
                Some(parse_day_first(raw).ok_or_else(|| format!("'{raw}' is not a date (DD/MM/YYYY)"))?)
            }
        }
    }
    Ok(())
}

fn options<T: fmt::Display>(opts: &[T]) -> String {
    opts.iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
