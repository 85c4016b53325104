use chrono::NaiveDate;
use talleres::utils::date::{format_wire, from_serial, parse_cli_date, parse_day_first, to_serial};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn test_parse_day_first_variants() {
    assert_eq!(parse_day_first("26/12/2025"), Some(d(2025, 12, 26)));
    assert_eq!(parse_day_first("03/04/2025"), Some(d(2025, 4, 3)));
    assert_eq!(parse_day_first("3-4-25"), Some(d(2025, 4, 3)));
    assert_eq!(parse_day_first("03.04.1999"), Some(d(1999, 4, 3)));
    assert_eq!(parse_day_first("2025-04-03"), Some(d(2025, 4, 3)));
    assert_eq!(parse_day_first("26/12/2025 00:00:00"), Some(d(2025, 12, 26)));
    assert_eq!(parse_day_first("2025-12-26T10:30:00"), Some(d(2025, 12, 26)));
}

#[test]
fn test_parse_day_first_rejects_garbage() {
    for s in ["", "  ", "mañana", "31/02/2025", "12/2025", "1/2/3/4"] {
        assert_eq!(parse_day_first(s), None, "{s}");
    }
}

#[test]
fn test_serial_days() {
    assert_eq!(from_serial(45658.0), Some(d(2025, 1, 1)));
    assert_eq!(from_serial(45658.75), Some(d(2025, 1, 1)));
    assert_eq!(from_serial(0.0), None);
    assert_eq!(from_serial(f64::NAN), None);
    assert_eq!(to_serial(d(2025, 1, 1)), 45658.0);
}

#[test]
fn test_format_wire() {
    assert_eq!(format_wire(d(2025, 1, 5)).as_deref(), Some("05/01/2025"));
    assert_eq!(format_wire(d(12000, 1, 5)), None);
}

#[test]
fn test_parse_cli_date() {
    assert_eq!(parse_cli_date("2025-01-31").ok(), Some(d(2025, 1, 31)));
    assert_eq!(parse_cli_date("31/01/2025").ok(), Some(d(2025, 1, 31)));
    assert!(parse_cli_date("yesterday").is_err());
}
