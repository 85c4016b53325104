pub mod audit;
pub mod config;
pub mod edit;
pub mod export;
pub mod grid;
pub mod import;
pub mod init;
pub mod list;
pub mod save;
pub mod stats;
pub mod whoami;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::store::{CachedStore, SheetStore, open_store};

pub type Store = CachedStore<Box<dyn SheetStore>>;

/// Open the configured store behind the read cache.
pub fn store(cfg: &Config) -> AppResult<Store> {
    let inner = open_store(cfg.backend, &cfg.store_path().to_string_lossy())?;
    Ok(CachedStore::new(inner, cfg.cache_ttl()))
}

/// Log in with the account given on the command line.
pub fn session(cli: &Cli, cfg: &Config) -> AppResult<Session> {
    let user = cli
        .user
        .as_deref()
        .ok_or_else(|| AppError::Auth("no account given, use --user".into()))?;
    let password = cli.password.as_deref().unwrap_or("");
    Session::login(&cfg.credentials(), user, password)
}
