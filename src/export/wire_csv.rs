use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::WireRow;
use crate::ui::messages::info;
use std::path::Path;

/// Export CSV (header included thanks to serde).
pub(crate) fn export_csv(rows: &[WireRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        // serde only writes the header alongside the first record
        wtr.write_record(crate::models::Column::ALL.iter().map(|c| c.header()))?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", rows.len(), path);
    Ok(())
}

/// Read a wire-format CSV (same layout as the CSV export).
pub fn read_wire_csv(path: &Path) -> AppResult<Vec<WireRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        out.push(rec?);
    }
    Ok(out)
}
