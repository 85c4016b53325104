use super::column::Column;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }

    /// Per-column edit permission. Nobody edits the Id by hand.
    pub fn can_edit(&self, column: Column) -> bool {
        match column {
            Column::No => false,
            Column::Sesiones | Column::Taller | Column::Fecha => true,
            Column::Cct | Column::Nivel | Column::Turno | Column::Plantel | Column::Direccion => {
                matches!(self, Role::Admin)
            }
        }
    }

    /// Only admins add rows in the grid.
    pub fn can_insert_rows(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_delete_rows(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
