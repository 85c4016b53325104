use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::filter::filter;
use crate::core::loader::load;
use crate::errors::AppResult;
use crate::models::{Column, Workshop};
use crate::ui::messages::info;
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::{self, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::List { filter: query } = &cli.command else {
        return Ok(());
    };

    let session = super::session(cli, cfg)?;
    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let view = filter(&full, query.as_deref().unwrap_or(""));

    let rows = view.rows(&full);
    if rows.is_empty() {
        info("No workshops match.");
        return Ok(());
    }

    print!("{}", render(&rows));
    println!(
        "{GREY}{} of {} row(s) · {}{RESET}",
        rows.len(),
        full.len(),
        session.banner()
    );
    Ok(())
}

/// Table of rows, one line each.
pub fn render(rows: &[&Workshop]) -> String {
    let columns = Column::ALL
        .iter()
        .map(|c| {
            let max = match c {
                Column::Plantel | Column::Direccion | Column::Taller => 28,
                Column::Nivel => 14,
                _ => 12,
            };
            table::Column::new(c.label(), max)
        })
        .collect();

    let mut t = Table::new(columns);
    for row in rows {
        t.add_row(Column::ALL.iter().map(|c| row.cell_text(*c)).collect());
    }
    t.render()
}
