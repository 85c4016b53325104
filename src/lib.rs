//! talleres library root.
//! Exposes the CLI parser, the high-level run() function, and the modules
//! behind it: the worksheet store, the load/filter/reconcile/serialize core,
//! the editable grid and the exports.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod grid;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(cli, cfg),
        Commands::Whoami => commands::whoami::handle(cli, cfg),
        Commands::List { .. } => commands::list::handle(cli, cfg),
        Commands::Grid { .. } => commands::grid::handle(cli, cfg),
        Commands::Save { .. } => commands::save::handle(cli, cfg),
        Commands::Edit { .. } => commands::edit::handle(cli, cfg),
        Commands::Stats { .. } => commands::stats::handle(cli, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Import { .. } => commands::import::handle(cli, cfg),
        Commands::Audit { .. } => commands::audit::handle(cli, cfg),
    }
}

/// Apply the store overrides given on the command line.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(backend) = cli.backend
        && backend != cfg.backend
    {
        cfg.backend = backend;
        if cli.store.is_none() {
            cfg.store = Config::default_store(backend).to_string_lossy().to_string();
        }
    }

    if let Some(store) = &cli.store {
        cfg.store = store.clone();
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load(cli.config.as_deref().map(Path::new))?;

    // 3️⃣ command-line overrides
    apply_overrides(&cli, &mut cfg);

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
