use serde::Serialize;

/// Number of worksheet columns read from and written to the store.
pub const COLUMN_COUNT: usize = 9;

/// The nine worksheet columns, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    No,        // Id
    Cct,       // facility code
    Nivel,     // school level
    Turno,     // shift
    Plantel,   // facility name
    Direccion, // address
    Sesiones,  // session count
    Taller,    // workshop name
    Fecha,     // date
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::No,
        Column::Cct,
        Column::Nivel,
        Column::Turno,
        Column::Plantel,
        Column::Direccion,
        Column::Sesiones,
        Column::Taller,
        Column::Fecha,
    ];

    /// Column name as stored in the worksheet header.
    pub fn header(&self) -> &'static str {
        match self {
            Column::No => "No",
            Column::Cct => "CCT",
            Column::Nivel => "Nivel",
            Column::Turno => "Turno",
            Column::Plantel => "Plantel",
            Column::Direccion => "Direccion",
            Column::Sesiones => "Sesiones",
            Column::Taller => "Taller",
            Column::Fecha => "Fecha",
        }
    }

    /// Human label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            Column::No => "No.",
            Column::Direccion => "Dirección",
            Column::Taller => "Nombre Taller",
            other => other.header(),
        }
    }

    pub fn index(&self) -> usize {
        Column::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    pub fn from_header(s: &str) -> Option<Self> {
        let s = s.trim();
        Column::ALL.into_iter().find(|c| c.header().eq_ignore_ascii_case(s))
    }
}
