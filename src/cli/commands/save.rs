use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter::{View, filter};
use crate::core::loader::load;
use crate::core::save::{SaveLogic, SaveReport};
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::grid::GridEdit;
use crate::models::{RowSet, Workshop};
use crate::ui::messages::{success, warning};
use std::path::Path;

use super::Store;

/// Save an edited grid file.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Save {
        file,
        filter: query,
    } = &cli.command
    else {
        return Ok(());
    };

    let session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let view = filter(&full, query.as_deref().unwrap_or(""));

    let edit = crate::grid::read_grid(Path::new(file), &full, &view, &session)?;
    save_edit(&mut store, cfg, &full, &view, &session, edit)?;
    Ok(())
}

/// Report grid issues, then reconcile and write.
pub(crate) fn save_edit(
    store: &mut Store,
    cfg: &Config,
    full: &RowSet,
    view: &View,
    session: &Session,
    edit: GridEdit,
) -> AppResult<SaveReport> {
    for issue in &edit.issues {
        warning(issue);
    }

    let report = SaveLogic::apply(
        store,
        &cfg.worksheet,
        full,
        edit.rows,
        view,
        session,
        cfg.save_options(),
    )?;

    if let Some(w) = &report.format_warning {
        warning(format!("{w}; those dates were saved unformatted"));
    }

    success(format!(
        "Worksheet '{}' updated: {} row(s), {} new id(s).",
        cfg.worksheet,
        report.saved.len(),
        report.ids_assigned
    ));
    Ok(report)
}

/// True when the edited rows are exactly the visible ones.
pub(crate) fn is_unchanged(visible: &[&Workshop], edited: &[Workshop]) -> bool {
    visible.len() == edited.len() && visible.iter().zip(edited).all(|(a, b)| *a == b)
}
