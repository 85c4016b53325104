// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::wire_csv::export_csv;
use crate::export::xlsx::export_xlsx;
use crate::models::WireRow;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export wire rows to `file` in the requested format.
    pub fn export(
        rows: &[WireRow],
        format: ExportFormat,
        file: &Path,
        sheet_name: &str,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(file, force)?;

        if rows.is_empty() {
            warning("No rows match the selection, exporting an empty sheet.");
        }

        match format {
            ExportFormat::Csv => export_csv(rows, file)?,
            ExportFormat::Json => export_json(rows, file)?,
            ExportFormat::Xlsx => export_xlsx(rows, file, sheet_name)?,
        }

        log::info!("exported {} row(s) as {}", rows.len(), format.as_str());
        Ok(())
    }
}
