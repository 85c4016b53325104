use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::grid::open_in_editor;
use crate::ui::messages::{header, success, warning};
use std::path::PathBuf;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    else {
        return Ok(());
    };

    let path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    // ---- PRINT CONFIG ----
    if *print_config {
        header(format!("Configuration ({})", path.display()));

        // secrets are never echoed
        let mut shown = cfg.clone();
        for secret in [&mut shown.passwords.admin, &mut shown.passwords.user] {
            if secret.is_some() {
                *secret = Some("********".to_string());
            }
        }
        println!("{}", serde_yaml::to_string(&shown)?);
    }

    // ---- EDIT CONFIG ----
    if *edit_config {
        if !path.exists() {
            warning(format!("{} does not exist yet, writing defaults first", path.display()));
            cfg.save(&path)?;
        }
        let used = open_in_editor(&path, editor.as_deref())?;
        success(format!("Configuration file edited successfully using '{used}'"));
    }

    Ok(())
}
