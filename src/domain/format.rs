// src/domain/format.rs

use chrono::{NaiveDate, NaiveDateTime};

/// "Oct 19, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    format_date(ts.date())
}

/// Hectares with one decimal, e.g. "12.5 ha".
pub fn format_hectares(value: f64) -> String {
    format!("{value:.1} ha")
}
