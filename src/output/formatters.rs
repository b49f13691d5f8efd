//! Reusable formatting helpers for display rows

use chrono::NaiveDate;

/// Placeholder for absent values
pub const EMPTY: &str = "-";

/// Render an optional string, using `-` when absent or blank.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

/// Render an optional displayable value, using `-` when absent.
pub fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| EMPTY.to_string())
}

/// Format a date as `DD Mon YYYY`, e.g. `05 Jan 2026`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Format a coordinate pair with five decimals, or `-` if either is missing.
pub fn format_location(latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => format!("{:.5}, {:.5}", lat, lon),
        _ => EMPTY.to_string(),
    }
}

/// Join a list with commas, or `-` when empty.
pub fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY.to_string()
    } else {
        items.join(", ")
    }
}

/// Truncate string to max characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
