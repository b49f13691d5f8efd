//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format each record as a block of `HEADER: value` lines.
///
/// Long rows (patients, visits) are easier to read this way on narrow
/// terminals.
pub fn format_pretty<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let headers = T::headers();
    let width = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0);

    data.iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.fields())
                .map(|(header, value)| format!("{:>width$}: {}", header, value, width = width))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
