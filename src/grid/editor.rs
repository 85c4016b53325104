use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::path::Path;
use std::process::Command;

/// Platform default editor: $EDITOR, $VISUAL, then nano/notepad.
pub fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Open `path` in the requested editor, falling back to the default one.
/// Returns the editor that succeeded.
pub fn open_in_editor(path: &Path, requested: Option<&str>) -> AppResult<String> {
    let fallback = default_editor();
    let editor = requested.map(str::to_string).unwrap_or_else(|| fallback.clone());

    match Command::new(&editor).arg(path).status() {
        Ok(s) if s.success() => return Ok(editor),
        Ok(_) | Err(_) => {
            if editor == fallback {
                return Err(AppError::Other(format!(
                    "editor '{editor}' failed on {}",
                    path.display()
                )));
            }
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor, fallback
            ));
        }
    }

    match Command::new(&fallback).arg(path).status() {
        Ok(s) if s.success() => Ok(fallback),
        Ok(_) | Err(_) => Err(AppError::Other(format!(
            "fallback editor '{fallback}' failed on {}",
            path.display()
        ))),
    }
}
