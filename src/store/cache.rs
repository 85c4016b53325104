//! Short-lived read cache in front of a store.

use super::{AuditEntry, Sheet, SheetStore};
use crate::errors::AppResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CachedSheet {
    fetched_at: Instant,
    columns: usize,
    sheet: Sheet,
}

/// Caches worksheet reads for a fixed interval to bound request volume.
/// Any write drops the cached copy of the written worksheet, so the next
/// read reflects the just-written state.
pub struct CachedStore<S: SheetStore> {
    inner: S,
    ttl: Duration,
    entries: HashMap<String, CachedSheet>,
}

impl<S: SheetStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn invalidate(&mut self, worksheet: &str) {
        self.entries.remove(worksheet);
    }

    pub fn is_cached(&self, worksheet: &str) -> bool {
        self.entries
            .get(worksheet)
            .is_some_and(|c| c.fetched_at.elapsed() < self.ttl)
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: SheetStore> SheetStore for CachedStore<S> {
    fn read(&mut self, worksheet: &str, columns: usize) -> AppResult<Sheet> {
        if let Some(c) = self.entries.get(worksheet)
            && c.columns == columns
            && c.fetched_at.elapsed() < self.ttl
        {
            log::debug!("worksheet '{worksheet}' served from cache");
            return Ok(c.sheet.clone());
        }

        let sheet = self.inner.read(worksheet, columns)?;
        if !self.ttl.is_zero() {
            self.entries.insert(
                worksheet.to_string(),
                CachedSheet {
                    fetched_at: Instant::now(),
                    columns,
                    sheet: sheet.clone(),
                },
            );
        }
        Ok(sheet)
    }

    fn write(&mut self, worksheet: &str, sheet: &Sheet) -> AppResult<()> {
        // a failed write may still have touched the worksheet
        self.invalidate(worksheet);
        self.inner.write(worksheet, sheet)
    }

    fn append_audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.inner.append_audit(operation, target, message)
    }

    fn audit_entries(&mut self) -> AppResult<Vec<AuditEntry>> {
        self.inner.audit_entries()
    }
}
