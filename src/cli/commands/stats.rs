use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::aggregate::{Stats, aggregate};
use crate::core::loader::load;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::{parse_cli_date, today};
use crate::utils::formatting::{bar, pad_left, pad_right};
use unicode_width::UnicodeWidthStr;

const BAR_WIDTH: usize = 30;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Stats { from, to, json } = &cli.command else {
        return Ok(());
    };

    let _session = super::session(cli, cfg)?;

    let from = match from {
        Some(s) => parse_cli_date(s)?,
        None => cfg.stats_from_date()?,
    };
    let to = match to {
        Some(s) => parse_cli_date(s)?,
        None => today(),
    };
    if from > to {
        return Err(AppError::InvalidRange(format!(
            "{} is after {}",
            from.format("%d/%m/%Y"),
            to.format("%d/%m/%Y")
        )));
    }

    let mut store = super::store(cfg)?;
    let full = load(&mut store, &cfg.worksheet)?;
    let stats = aggregate(&full, from, to);

    if *json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}

fn print_stats(stats: &Stats) {
    header(format!(
        "Statistics {} – {}",
        stats.from.format("%d/%m/%Y"),
        stats.to.format("%d/%m/%Y")
    ));

    println!("{CYAN}• Total talleres:{RESET} {GREEN}{}{RESET}", stats.total);
    println!("{CYAN}• Total sesiones:{RESET} {GREEN}{}{RESET}", stats.session_sum);

    if stats.is_empty() {
        println!();
        info("No data in this range.");
        return;
    }

    println!("\n{CYAN}Talleres por nivel{RESET}");

    let label_width = stats
        .by_level
        .iter()
        .map(|l| UnicodeWidthStr::width(l.level.as_str()))
        .max()
        .unwrap_or(0);
    let max = stats.by_level.first().map(|l| l.count).unwrap_or(0);

    for l in &stats.by_level {
        println!(
            "  {} {} {}",
            pad_right(&l.level, label_width),
            pad_left(&l.count.to_string(), 5),
            bar(l.count, max, BAR_WIDTH)
        );
    }
}
