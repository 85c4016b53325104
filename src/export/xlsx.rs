// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::{Column, WireRow};
use crate::ui::messages::info;
use crate::utils::date::{parse_day_first, to_serial};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with styled header, banded rows and auto column width.
pub(crate) fn export_xlsx(rows: &[WireRow], path: &Path, sheet_name: &str) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for col in Column::ALL {
        worksheet
            .write_with_format(0, col.index() as u16, col.header(), &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = Column::ALL
        .iter()
        .map(|c| UnicodeWidthStr::width(c.header()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, wire) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for col in Column::ALL {
            let value = wire.get(col);
            write_cell(worksheet, row, col, value, band)?;
            col_widths[col.index()] = col_widths[col.index()].max(UnicodeWidthStr::width(value));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", rows.len(), path);
    Ok(())
}

/// Write one cell: Fecha as a real date, No/Sesiones as numbers, the rest
/// as text.
fn write_cell(worksheet: &mut Worksheet, row: u32, col: Column, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if col == Column::Fecha
        && let Some(d) = parse_day_first(s)
    {
        let fmt = base.set_num_format("dd/mm/yyyy");
        worksheet
            .write_with_format(row, col.index() as u16, to_serial(d), &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    if matches!(col, Column::No | Column::Sesiones)
        && let Ok(num) = s.parse::<f64>()
    {
        let fmt = base.set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, col.index() as u16, num, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col.index() as u16, s, &base)
        .map_err(to_export_error)?;
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
