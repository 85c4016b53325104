use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter::filter;
use crate::core::loader::load;
use crate::core::serialize::serialize_rows;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::warning;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        format,
        file,
        filter: query,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    let _session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let view = filter(&full, query.as_deref().unwrap_or(""));

    let rows = match serialize_rows(view.rows(&full)) {
        Ok(rows) => rows,
        Err(w) => {
            warning(format!("{w}; exporting them unformatted"));
            w.fallback
        }
    };

    ExportLogic::export(&rows, *format, Path::new(file), &cfg.worksheet, *force)
}
