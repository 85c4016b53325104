use serde::Serialize;
use std::fmt;

/// School level of the facility hosting a workshop.
///
/// Values outside the option list are kept as `Unlisted` so that a save
/// never drops text the worksheet already holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    Preescolar,
    Primaria,
    Secundaria,
    MediaSuperior,
    Licenciatura,
    Bachillerato,
    Unlisted(String),
}

impl Level {
    /// Options offered by the grid editor.
    pub const OPTIONS: [Level; 6] = [
        Level::Preescolar,
        Level::Primaria,
        Level::Secundaria,
        Level::MediaSuperior,
        Level::Licenciatura,
        Level::Bachillerato,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Level::Preescolar => "PREESCOLAR",
            Level::Primaria => "PRIMARIA",
            Level::Secundaria => "SECUNDARIA",
            Level::MediaSuperior => "MEDIA SUPERIOR",
            Level::Licenciatura => "LICENCIATURA",
            Level::Bachillerato => "BACHILLERATO",
            Level::Unlisted(s) => s,
        }
    }

    /// Strict parse against the option list (case-insensitive).
    pub fn from_option(s: &str) -> Option<Self> {
        let wanted = s.trim().to_uppercase();
        Level::OPTIONS.into_iter().find(|l| l.as_str() == wanted)
    }

    /// Lenient parse used when loading the worksheet: blank → None,
    /// unknown text → `Unlisted`.
    pub fn from_sheet(s: &str) -> Option<Self> {
        let t = s.trim();
        if crate::models::workshop::is_blank(t) {
            return None;
        }
        Some(Level::from_option(t).unwrap_or_else(|| Level::Unlisted(t.to_string())))
    }

    pub fn is_listed(&self) -> bool {
        !matches!(self, Level::Unlisted(_))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
