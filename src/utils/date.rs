use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Wire format of the `Fecha` column.
pub const WIRE_FORMAT: &str = "%d/%m/%Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a date cell, reading ambiguous numeric dates as day/month/year.
///
/// Accepts `DD/MM/YYYY`, `DD-MM-YYYY`, `DD.MM.YYYY`, two-digit years, ISO
/// `YYYY-MM-DD` and any of those followed by a time of day (ignored).
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    let dt_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in dt_formats.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt.date());
        }
    }

    // Keep only the date part: "26/12/2025 00:00:00" → "26/12/2025"
    let date_part = t.split([' ', 'T']).next().unwrap_or(t);

    let parts: Vec<&str> = date_part.split(['/', '-', '.']).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    // YYYY-MM-DD is never ambiguous
    if parts[0].len() == 4 {
        let y: i32 = parts[0].parse().ok()?;
        let m: u32 = parts[1].parse().ok()?;
        let d: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }

    let d: u32 = parts[0].parse().ok()?;
    let m: u32 = parts[1].parse().ok()?;
    let y: i32 = match parts[2].len() {
        2 => {
            let yy: i32 = parts[2].parse().ok()?;
            if yy < 70 { 2000 + yy } else { 1900 + yy }
        }
        4 => parts[2].parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(y, m, d)
}

/// Convert a spreadsheet serial day number (1899-12-30 epoch) to a date.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Spreadsheet serial day number of a date.
pub fn to_serial(date: NaiveDate) -> f64 {
    match NaiveDate::from_ymd_opt(1899, 12, 30) {
        Some(epoch) => (date - epoch).num_days() as f64,
        None => 0.0,
    }
}

/// Format a date for the wire. Returns `None` when the year cannot be
/// written with four digits.
pub fn format_wire(date: NaiveDate) -> Option<String> {
    if (1..=9999).contains(&date.year()) {
        Some(date.format(WIRE_FORMAT).to_string())
    } else {
        None
    }
}

/// Parse a date given on the command line (`YYYY-MM-DD` or `DD/MM/YYYY`).
pub fn parse_cli_date(s: &str) -> AppResult<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return Ok(d);
    }
    parse_day_first(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}
