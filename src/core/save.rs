use crate::core::filter::View;
use crate::core::reconcile::{DeletePolicy, assign_ids, fill_sentinels, reconcile};
use crate::core::serialize::{FormatWarning, serialize, to_sheet};
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{RowSet, Workshop};
use crate::store::SheetStore;
use serde::{Deserialize, Serialize};

/// What a save does when some dates cannot be written in wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatWarningPolicy {
    /// Write the dates unformatted and carry on.
    #[default]
    Proceed,
    /// Abort the save, nothing is written.
    Block,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    pub delete_policy: DeletePolicy,
    pub on_format_warning: FormatWarningPolicy,
}

#[derive(Debug)]
pub struct SaveReport {
    /// The full set as written.
    pub saved: RowSet,
    pub ids_assigned: usize,
    pub sentinels_filled: usize,
    pub format_warning: Option<FormatWarning>,
}

pub struct SaveLogic;

impl SaveLogic {
    /// Reconcile the edited view, assign ids, serialize and write the whole
    /// worksheet in a single call.
    ///
    /// `full` is only borrowed: when the write fails the caller still holds
    /// the state it loaded and may retry.
    pub fn apply<S: SheetStore + ?Sized>(
        store: &mut S,
        worksheet: &str,
        full: &RowSet,
        edited: Vec<Workshop>,
        view: &View,
        session: &Session,
        options: SaveOptions,
    ) -> AppResult<SaveReport> {
        if !session.authenticated {
            return Err(AppError::Auth("session is not authenticated".into()));
        }

        let merged = reconcile(full, edited, view, options.delete_policy);
        let detail = view
            .query()
            .map(|q| format!(", filter '{q}'"))
            .unwrap_or_default();

        Self::persist(store, worksheet, merged, options, "save", &session.user, &detail)
    }

    /// Replace the whole worksheet with `rows`, as an import does.
    ///
    /// Rows go through the same id assignment, placeholder clearing and
    /// date formatting as a save, so imported data obeys the wire format.
    pub fn replace<S: SheetStore + ?Sized>(
        store: &mut S,
        worksheet: &str,
        rows: Vec<Workshop>,
        actor: &str,
        source: &str,
        options: SaveOptions,
    ) -> AppResult<SaveReport> {
        let detail = format!(" from {source}");
        Self::persist(
            store,
            worksheet,
            RowSet::from_rows(rows),
            options,
            "import",
            actor,
            &detail,
        )
    }

    fn persist<S: SheetStore + ?Sized>(
        store: &mut S,
        worksheet: &str,
        mut merged: RowSet,
        options: SaveOptions,
        operation: &str,
        actor: &str,
        detail: &str,
    ) -> AppResult<SaveReport> {
        let ids_assigned = assign_ids(&mut merged);
        let sentinels_filled = fill_sentinels(&mut merged);

        let (wire, format_warning) = match serialize(&merged) {
            Ok(rows) => (rows, None),
            Err(w) => match options.on_format_warning {
                FormatWarningPolicy::Block => return Err(AppError::FormatBlocked(w.rows.len())),
                FormatWarningPolicy::Proceed => (w.fallback.clone(), Some(w)),
            },
        };

        store.write(worksheet, &to_sheet(&wire))?;

        let message = format!(
            "{} row(s) written, {} new id(s){detail}",
            wire.len(),
            ids_assigned
        );
        // the worksheet is already written: a missing audit line is not fatal
        if let Err(e) = store.append_audit(operation, actor, &message) {
            log::warn!("could not record audit entry: {e}");
        }

        log::info!("{operation} on worksheet '{worksheet}': {message}");

        Ok(SaveReport {
            saved: merged,
            ids_assigned,
            sentinels_filled,
            format_warning,
        })
    }
}
