//! Filtered row output formatting.

use hashquery_rs::filter::Row;
use hashquery_rs::Column;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_cell, truncate_str};

/// Maximum width of a table cell.
const CELL_WIDTH: usize = 18;

/// JSON output structure for filter command.
#[derive(Serialize)]
pub struct RowsOutput<'a> {
    pub kind: &'a str,
    pub total: usize,
    pub count: usize,
    pub rows: &'a [&'a Row],
}

/// Formats filtered rows as JSON.
pub fn format_rows_json(
    kind: &str,
    total: usize,
    rows: &[&Row],
) -> Result<String, serde_json::Error> {
    let output = RowsOutput {
        kind,
        total,
        count: rows.len(),
        rows,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats filtered rows as a table with one column per catalog entry.
///
/// Without a catalog, the keys of the first row are used.
pub fn format_rows_table(rows: &[&Row], catalog: &[Column], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No matching rows.\n".to_string();
    }

    let fields: Vec<(&str, &str)> = if catalog.is_empty() {
        rows[0].keys().map(|k| (k.as_str(), k.as_str())).collect()
    } else {
        catalog.iter().map(|c| (c.field.as_str(), c.label())).collect()
    };

    let mut output = String::new();

    let header = fields
        .iter()
        .map(|(_, label)| format!("{:<width$}", truncate_str(label, CELL_WIDTH), width = CELL_WIDTH))
        .collect::<Vec<_>>()
        .join(" ");
    let header = header.trim_end();
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(header);
        output.push('\n');
    }

    for row in rows {
        let line = fields
            .iter()
            .map(|(field, _)| {
                let cell = truncate_str(&format_cell(row.get(*field)), CELL_WIDTH);
                format!("{:<width$}", cell, width = CELL_WIDTH)
            })
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output.push_str(&format!("\n{} row(s)\n", rows.len()));
    output
}
