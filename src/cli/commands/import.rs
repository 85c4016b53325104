use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::loader::{load, rows_from_wire};
use crate::core::save::SaveLogic;
use crate::errors::AppResult;
use crate::export::read_wire_csv;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Replace the worksheet with the content of a wire-format CSV.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Import { file } = &cli.command else {
        return Ok(());
    };

    let session = super::session(cli, cfg)?;
    session.require_admin("import")?;

    let rows = rows_from_wire(&read_wire_csv(Path::new(file))?);

    let mut store = super::store(cfg)?;
    let report = SaveLogic::replace(
        &mut store,
        &cfg.worksheet,
        rows,
        &session.user,
        file,
        cfg.save_options(),
    )?;
    if let Some(w) = &report.format_warning {
        warning(format!("{w}; those dates were imported unformatted"));
    }

    // read back through the loader so bad cells show up now
    let loaded = load(&mut store, &cfg.worksheet)?;
    let undated = loaded.iter().filter(|r| r.date.is_none()).count();
    if undated > 0 {
        warning(format!("{undated} row(s) have no readable date"));
    }
    let unlisted = loaded
        .iter()
        .filter(|r| {
            r.level.as_ref().is_some_and(|l| !l.is_listed())
                || r.shift.as_ref().is_some_and(|s| !s.is_listed())
        })
        .count();
    if unlisted > 0 {
        warning(format!(
            "{unlisted} row(s) hold a level or shift outside the option list"
        ));
    }

    success(format!(
        "Imported {} row(s) into '{}', {} new id(s).",
        loaded.len(),
        cfg.worksheet,
        report.ids_assigned
    ));
    Ok(())
}
