use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Shift {
    Matutino,
    Vespertino,
    Mixto,
    Unlisted(String),
}

impl Shift {
    pub const OPTIONS: [Shift; 3] = [Shift::Matutino, Shift::Vespertino, Shift::Mixto];

    pub fn as_str(&self) -> &str {
        match self {
            Shift::Matutino => "MATUTINO",
            Shift::Vespertino => "VESPERTINO",
            Shift::Mixto => "MIXTO",
            Shift::Unlisted(s) => s,
        }
    }

    pub fn from_option(s: &str) -> Option<Self> {
        let wanted = s.trim().to_uppercase();
        Shift::OPTIONS.into_iter().find(|v| v.as_str() == wanted)
    }

    pub fn from_sheet(s: &str) -> Option<Self> {
        let t = s.trim();
        if crate::models::workshop::is_blank(t) {
            return None;
        }
        Some(Shift::from_option(t).unwrap_or_else(|| Shift::Unlisted(t.to_string())))
    }

    pub fn is_listed(&self) -> bool {
        !matches!(self, Shift::Unlisted(_))
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
