//! Search over the full set: the visible view is a list of row keys.

use crate::models::{RowKey, RowSet, Workshop};

/// The visible subset of the full set, by row key.
///
/// Keys survive the grid throwing away and recreating row objects, so the
/// reconciler can always map an edited row back to the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    query: Option<String>,
    keys: Vec<RowKey>,
}

impl View {
    /// Identity view over every row.
    pub fn all(full: &RowSet) -> Self {
        Self {
            query: None,
            keys: full.iter().filter_map(|r| r.key).collect(),
        }
    }

    /// False for the identity view.
    pub fn is_filtered(&self) -> bool {
        self.query.is_some()
    }

    /// The search text, as typed.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    /// Whether the row with `key` is visible.
    pub fn contains(&self, key: RowKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Visible rows, in full-set order.
    pub fn rows<'a>(&self, full: &'a RowSet) -> Vec<&'a Workshop> {
        full.iter()
            .filter(|r| r.key.is_some_and(|k| self.contains(k)))
            .collect()
    }
}

/// Select rows whose code or facility name contains `query`,
/// case-insensitively. The query is matched as given, surrounding spaces
/// included; a blank query selects everything.
pub fn filter(full: &RowSet, query: &str) -> View {
    if query.trim().is_empty() {
        return View::all(full);
    }

    let needle = query.to_lowercase();
    let keys: Vec<RowKey> = full
        .iter()
        .filter(|r| matches(r, &needle))
        .filter_map(|r| r.key)
        .collect();

    log::debug!("filter '{}' matched {} of {} row(s)", needle, keys.len(), full.len());

    View {
        query: Some(query.to_string()),
        keys,
    }
}

fn matches(row: &Workshop, needle: &str) -> bool {
    contains_ci(&row.code, needle) || contains_ci(&row.facility_name, needle)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle_lower)
}
