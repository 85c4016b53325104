use crate::models::RowSet;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: usize,
}

/// Counts for a period, shown by the statistics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: usize,
    pub session_sum: u64,
    /// Workshops per level, most frequent first.
    pub by_level: Vec<LevelCount>,
}

impl Stats {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Aggregate the rows dated within `[from, to]` (inclusive). Rows without a
/// date never count; missing session counts count as zero.
pub fn aggregate(full: &RowSet, from: NaiveDate, to: NaiveDate) -> Stats {
    let mut total = 0usize;
    let mut session_sum = 0u64;
    let mut per_level: HashMap<String, usize> = HashMap::new();

    for row in full {
        let Some(d) = row.date else { continue };
        if d < from || d > to {
            continue;
        }

        total += 1;
        session_sum += u64::from(row.session_count.unwrap_or(0));

        if let Some(level) = &row.level {
            *per_level.entry(level.to_string()).or_default() += 1;
        }
    }

    let mut by_level: Vec<LevelCount> = per_level
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();
    by_level.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.level.cmp(&b.level)));

    Stats {
        from,
        to,
        total,
        session_sum,
        by_level,
    }
}
