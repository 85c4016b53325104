use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter::filter;
use crate::core::loader::load;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::grid::write_grid;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Write the visible rows to a grid file for editing.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Grid {
        file,
        filter: query,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    let session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let view = filter(&full, query.as_deref().unwrap_or(""));

    let path = Path::new(file);
    ensure_writable(path, *force)?;
    write_grid(path, &full, &view)?;

    success(format!("{} row(s) written to {}", view.len(), path.display()));

    let filter_arg = view
        .query()
        .map(|q| format!(" --filter \"{q}\""))
        .unwrap_or_default();
    info(format!(
        "Edit the file, then run: talleres --user {} save --file {}{}",
        session.user, file, filter_arg
    ));
    Ok(())
}
