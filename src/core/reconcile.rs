//! Merge an edited (possibly filtered) view back into the full set.

use crate::core::filter::View;
use crate::models::workshop::is_blank;
use crate::models::{RowId, RowKey, RowSet, Workshop};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What happens to visible rows that are missing from the edited set when a
/// filter was active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// The filtered view only updates and appends: rows deleted while
    /// filtered stay in the full set.
    #[default]
    Retain,
    /// Rows deleted while filtered are removed from the full set.
    Propagate,
}

/// Build the new full set from the edited view.
///
/// - unfiltered view: the edited rows are the new full set;
/// - filtered view: rows matched by key are overwritten, rows outside the
///   view are left alone, rows without a visible key are appended.
pub fn reconcile(full: &RowSet, edited: Vec<Workshop>, view: &View, policy: DeletePolicy) -> RowSet {
    if !view.is_filtered() {
        return RowSet::from_rows(edited);
    }

    let mut merged = full.clone();
    let mut seen: HashSet<RowKey> = HashSet::new();
    let mut appended = 0usize;

    for mut row in edited {
        match row.key {
            Some(k) if view.contains(k) && !seen.contains(&k) => {
                if let Some(target) = merged.get_mut(k) {
                    target.overwrite_from(&row);
                    seen.insert(k);
                    continue;
                }
                row.key = None;
                merged.push(row);
                appended += 1;
            }
            _ => {
                row.key = None;
                merged.push(row);
                appended += 1;
            }
        }
    }

    if policy == DeletePolicy::Propagate {
        let gone: HashSet<RowKey> = view
            .keys()
            .iter()
            .copied()
            .filter(|k| !seen.contains(k))
            .collect();
        if !gone.is_empty() {
            log::info!("removing {} row(s) deleted under filter", gone.len());
            merged.retain(|r| r.key.is_none_or(|k| !gone.contains(&k)));
        }
    }

    log::debug!(
        "merged {} edited row(s), appended {}, full set now {}",
        seen.len(),
        appended,
        merged.len()
    );
    merged
}

/// Give every row without an Id the next integer after the highest numeric
/// Id, in row order. Existing Ids are never changed. Once the integer range
/// is exhausted, the lowest unused Ids are handed out instead. Returns the
/// number of Ids assigned.
pub fn assign_ids(rows: &mut RowSet) -> usize {
    let mut used: HashSet<u64> = rows
        .iter()
        .filter(|r| !r.needs_id())
        .filter_map(|r| match &r.id {
            Some(RowId::Number(n)) => Some(*n),
            _ => None,
        })
        .collect();

    let highest = rows
        .iter()
        .filter(|r| !r.needs_id())
        .filter_map(|r| r.id.as_ref())
        .map(RowId::numeric_value)
        .max()
        .unwrap_or(0);

    let mut next = highest.checked_add(1);
    let mut lowest_free = 1u64;
    let mut assigned = 0;

    for row in rows.rows_mut() {
        if !row.needs_id() {
            continue;
        }
        let id = match next {
            Some(n) => {
                next = n.checked_add(1);
                n
            }
            None => {
                while used.contains(&lowest_free) {
                    lowest_free += 1;
                }
                lowest_free
            }
        };
        used.insert(id);
        row.id = Some(RowId::Number(id));
        assigned += 1;
    }

    if assigned > 0 {
        log::info!("assigned {assigned} new id(s) after {highest}");
    }
    assigned
}

/// Replace null placeholders held in text columns with empty strings.
/// Returns the number of cells replaced.
pub fn fill_sentinels(rows: &mut RowSet) -> usize {
    let mut filled = 0;
    for row in rows.rows_mut() {
        for text in [
            &mut row.code,
            &mut row.facility_name,
            &mut row.address,
            &mut row.workshop_name,
        ] {
            if !text.is_empty() && is_blank(text) {
                text.clear();
                filled += 1;
            }
        }
    }
    filled
}
