//! Column catalog output formatting.

use hashquery_rs::filter::{build_column_pattern, PatternMode};
use hashquery_rs::Column;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_value_type, truncate_str};

/// JSON output structure for columns list command.
#[derive(Serialize)]
pub struct ColumnsListOutput<'a> {
    pub columns: Vec<ColumnOutput<'a>>,
}

/// JSON output structure for a single column.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOutput<'a> {
    pub field: &'a str,
    pub display_name: &'a str,
    pub value_type: &'a str,
    pub searchable: bool,
    pub pattern: String,
}

/// Formats columns as JSON.
pub fn format_columns_json(columns: &[&Column]) -> Result<String, serde_json::Error> {
    let columns_output: Vec<ColumnOutput> = columns
        .iter()
        .map(|c| ColumnOutput {
            field: &c.field,
            display_name: c.label(),
            value_type: c.value_type.as_str(),
            searchable: c.searchable,
            pattern: build_column_pattern(c, PatternMode::Colon),
        })
        .collect();

    let output = ColumnsListOutput {
        columns: columns_output,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats columns as a table.
pub fn format_columns_table(columns: &[&Column], use_colors: bool) -> String {
    if columns.is_empty() {
        return "No columns found.\n".to_string();
    }

    let mut output = String::new();

    // Header
    let header = format!("{:<16} {:<20} {:<8} {}", "Field", "Name", "Type", "Pattern");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    // Columns (type is padded before coloring so ANSI codes don't skew alignment)
    for column in columns {
        let value_type = format!("{:<8}", column.value_type.as_str());
        let value_type = if use_colors {
            value_type.replace(
                column.value_type.as_str(),
                &format_value_type(column.value_type, true),
            )
        } else {
            value_type
        };
        let line = format!(
            "{:<16} {:<20} {} {}",
            truncate_str(&column.field, 16),
            truncate_str(column.label(), 20),
            value_type,
            build_column_pattern(column, PatternMode::Colon)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}
