use super::column::{COLUMN_COUNT, Column};
use serde::{Deserialize, Serialize};

/// One worksheet row in its textual wire form.
///
/// Every column is plain text: numbers as decimal digits, `Fecha` as
/// `DD/MM/YYYY`, and missing values as empty strings (never a null marker).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireRow {
    #[serde(rename = "No", default)]
    pub no: String,
    #[serde(rename = "CCT", default)]
    pub cct: String,
    #[serde(rename = "Nivel", default)]
    pub nivel: String,
    #[serde(rename = "Turno", default)]
    pub turno: String,
    #[serde(rename = "Plantel", default)]
    pub plantel: String,
    #[serde(rename = "Direccion", default)]
    pub direccion: String,
    #[serde(rename = "Sesiones", default)]
    pub sesiones: String,
    #[serde(rename = "Taller", default)]
    pub taller: String,
    #[serde(rename = "Fecha", default)]
    pub fecha: String,
}

impl WireRow {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::No => &self.no,
            Column::Cct => &self.cct,
            Column::Nivel => &self.nivel,
            Column::Turno => &self.turno,
            Column::Plantel => &self.plantel,
            Column::Direccion => &self.direccion,
            Column::Sesiones => &self.sesiones,
            Column::Taller => &self.taller,
            Column::Fecha => &self.fecha,
        }
    }

    pub fn set(&mut self, column: Column, value: String) {
        match column {
            Column::No => self.no = value,
            Column::Cct => self.cct = value,
            Column::Nivel => self.nivel = value,
            Column::Turno => self.turno = value,
            Column::Plantel => self.plantel = value,
            Column::Direccion => self.direccion = value,
            Column::Sesiones => self.sesiones = value,
            Column::Taller => self.taller = value,
            Column::Fecha => self.fecha = value,
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        Column::ALL.map(|c| self.get(c))
    }
}
