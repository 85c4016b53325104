use super::{column::Column, level::Level, shift::Shift};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Textual placeholders the worksheet (or a spreadsheet tool) may use for
/// a missing value.
const NULL_PLACEHOLDERS: [&str; 7] = ["nan", "none", "null", "<na>", "nat", "n/a", "undefined"];

/// True when `s` is empty or one of the textual "no value" markers.
pub fn is_blank(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || NULL_PLACEHOLDERS.contains(&t.to_ascii_lowercase().as_str())
}

/// Session-local identity of a row. Assigned at load time (original
/// position) or when an inserted row joins the full set. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RowKey(pub usize);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of the `No` column once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowId {
    Number(u64),
    Text(String),
}

impl RowId {
    /// Parse a textual id. Placeholders mean "unassigned".
    pub fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        if is_blank(t) {
            return None;
        }
        if let Ok(n) = t.parse::<u64>() {
            return Some(RowId::Number(n));
        }
        // "12.0" as produced by float-typed sheet columns
        if let Ok(f) = t.parse::<f64>()
            && f.fract() == 0.0
            && f >= 0.0
            && f <= u64::MAX as f64
        {
            return Some(RowId::Number(f as u64));
        }
        Some(RowId::Text(t.to_string()))
    }

    /// Integer value used to find the highest id; non-numeric ids count as 0.
    pub fn numeric_value(&self) -> u64 {
        match self {
            RowId::Number(n) => *n,
            RowId::Text(_) => 0,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

/// One workshop record ("Taller").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Workshop {
    #[serde(skip)]
    pub key: Option<RowKey>,
    pub id: Option<RowId>,           // ⇔ No
    pub code: String,                // ⇔ CCT
    pub level: Option<Level>,        // ⇔ Nivel
    pub shift: Option<Shift>,        // ⇔ Turno
    pub facility_name: String,       // ⇔ Plantel
    pub address: String,             // ⇔ Direccion
    pub session_count: Option<u32>,  // ⇔ Sesiones
    pub workshop_name: String,       // ⇔ Taller
    pub date: Option<NaiveDate>,     // ⇔ Fecha
}

impl Workshop {
    /// Display text of a column (dates as DD/MM/YYYY, absent values empty).
    pub fn cell_text(&self, column: Column) -> String {
        match column {
            Column::No => self.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            Column::Cct => self.code.clone(),
            Column::Nivel => self.level.as_ref().map(|l| l.to_string()).unwrap_or_default(),
            Column::Turno => self.shift.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            Column::Plantel => self.facility_name.clone(),
            Column::Direccion => self.address.clone(),
            Column::Sesiones => self.session_count.map(|n| n.to_string()).unwrap_or_default(),
            Column::Taller => self.workshop_name.clone(),
            Column::Fecha => self
                .date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
        }
    }

    /// Copy a single column from `other`.
    pub fn copy_field(&mut self, column: Column, other: &Workshop) {
        match column {
            Column::No => self.id = other.id.clone(),
            Column::Cct => self.code = other.code.clone(),
            Column::Nivel => self.level = other.level.clone(),
            Column::Turno => self.shift = other.shift.clone(),
            Column::Plantel => self.facility_name = other.facility_name.clone(),
            Column::Direccion => self.address = other.address.clone(),
            Column::Sesiones => self.session_count = other.session_count,
            Column::Taller => self.workshop_name = other.workshop_name.clone(),
            Column::Fecha => self.date = other.date,
        }
    }

    /// Overwrite every field but the key.
    pub fn overwrite_from(&mut self, other: &Workshop) {
        for col in Column::ALL {
            self.copy_field(col, other);
        }
    }

    /// Whether the Id is still unassigned.
    pub fn needs_id(&self) -> bool {
        match &self.id {
            None => true,
            Some(RowId::Text(t)) => is_blank(t),
            Some(RowId::Number(_)) => false,
        }
    }
}

/// The full row set, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    rows: Vec<Workshop>,
    next_key: usize,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from rows, keeping existing keys and keying the others.
    pub fn from_rows(rows: Vec<Workshop>) -> Self {
        let next_key = rows
            .iter()
            .filter_map(|r| r.key)
            .map(|k| k.0 + 1)
            .max()
            .unwrap_or(0);

        let mut set = Self {
            rows: Vec::with_capacity(rows.len()),
            next_key,
        };
        for r in rows {
            set.push(r);
        }
        set
    }

    /// Append a row, handing out a fresh key when it has none.
    pub fn push(&mut self, mut row: Workshop) -> RowKey {
        let key = match row.key {
            Some(k) if self.get(k).is_none() => {
                self.next_key = self.next_key.max(k.0 + 1);
                k
            }
            _ => {
                let k = RowKey(self.next_key);
                self.next_key += 1;
                k
            }
        };
        row.key = Some(key);
        self.rows.push(row);
        key
    }

    pub fn get(&self, key: RowKey) -> Option<&Workshop> {
        self.rows.iter().find(|r| r.key == Some(key))
    }

    pub fn get_mut(&mut self, key: RowKey) -> Option<&mut Workshop> {
        self.rows.iter_mut().find(|r| r.key == Some(key))
    }

    pub fn contains(&self, key: RowKey) -> bool {
        self.get(key).is_some()
    }

    pub fn retain<F: FnMut(&Workshop) -> bool>(&mut self, f: F) {
        self.rows.retain(f);
    }

    pub fn rows(&self) -> &[Workshop] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Workshop] {
        &mut self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workshop> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Workshop;
    type IntoIter = std::slice::Iter<'a, Workshop>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
