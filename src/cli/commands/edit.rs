use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter::filter;
use crate::core::loader::load;
use crate::errors::AppResult;
use crate::grid::{open_in_editor, read_grid, write_grid};
use crate::ui::messages::info;
use std::fs;

use super::save::{is_unchanged, save_edit};

/// Grid, editor and save in one step.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Edit {
        filter: query,
        editor,
    } = &cli.command
    else {
        return Ok(());
    };

    let session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let view = filter(&full, query.as_deref().unwrap_or(""));

    let path = std::env::temp_dir().join(format!("talleres-grid-{}.csv", std::process::id()));
    write_grid(&path, &full, &view)?;

    info(format!("{} · editing {} row(s)", session.banner(), view.len()));

    let result = open_in_editor(&path, editor.as_deref())
        .and_then(|_| read_grid(&path, &full, &view, &session));
    fs::remove_file(&path).ok();
    let edit = result?;

    if edit.issues.is_empty() && is_unchanged(&view.rows(&full), &edit.rows) {
        info("No changes, nothing to save.");
        return Ok(());
    }

    save_edit(&mut store, cfg, &full, &view, &session, edit)?;
    Ok(())
}
