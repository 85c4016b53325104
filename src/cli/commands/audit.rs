use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::SheetStore;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

/// Print the audit trail, most recent first.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Audit { limit } = &cli.command else {
        return Ok(());
    };

    let _session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let mut entries = store.audit_entries()?;

    if let Some(n) = limit {
        entries.truncate(*n);
    }

    if entries.is_empty() {
        info("Audit trail is empty.");
        return Ok(());
    }

    let mut t = Table::new(vec![
        Column::new("Date", 25),
        Column::new("Operation", 18),
        Column::new("Target", 36),
        Column::new("Message", 60),
    ]);
    for e in entries {
        t.add_row(vec![e.date, e.operation, e.target, e.message]);
    }
    print!("{}", t.render());
    Ok(())
}
