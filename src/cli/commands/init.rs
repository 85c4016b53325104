use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::loader::rows_from_wire;
use crate::core::save::SaveLogic;
use crate::core::serialize::to_sheet;
use crate::errors::AppResult;
use crate::export::read_wire_csv;
use crate::models::COLUMN_COUNT;
use crate::store::SheetStore;
use crate::ui::messages::{info, success, warning};
use std::path::{Path, PathBuf};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and the configuration file (skipped in test mode)
///  - the store (sqlite file or csv directory) and its schema
///  - the worksheet, empty or seeded from `--import`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Init { import } = &cli.command else {
        return Ok(());
    };

    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    println!("⚙️  Initializing talleres…");

    if !cli.test {
        if config_path.exists() {
            info(format!("Config file already present: {}", config_path.display()));
        } else {
            cfg.save(&config_path)?;
            success(format!("Config file: {}", config_path.display()));
        }
    }

    if let Some(parent) = cfg.store_path().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut store = super::store(cfg)?;
    println!("🗄️  Store      : {} ({})", cfg.store_path().display(), cfg.backend.as_str());
    println!("📄 Worksheet  : {}", cfg.worksheet);

    match import {
        Some(file) => {
            let rows = rows_from_wire(&read_wire_csv(Path::new(file))?);
            let report = SaveLogic::replace(
                &mut store,
                &cfg.worksheet,
                rows,
                "init",
                file,
                cfg.save_options(),
            )?;
            if let Some(w) = &report.format_warning {
                warning(format!("{w}; those dates were imported unformatted"));
            }
            success(format!(
                "Imported {} row(s) from {file}, {} new id(s)",
                report.saved.len(),
                report.ids_assigned
            ));
        }
        None => {
            if store.read(&cfg.worksheet, COLUMN_COUNT).is_err() {
                store.write(&cfg.worksheet, &to_sheet(&[]))?;
                success("Created an empty worksheet.");
            } else {
                info("Worksheet already present, left untouched.");
            }
        }
    }

    success("talleres initialized.");
    Ok(())
}
