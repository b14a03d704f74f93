//! Filter command implementation.
//!
//! Applies search text to rows loaded from a JSON file.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use hashquery_rs::filter::{matches_free_text, parse_search, FilterEvaluator, Row, SearchOutcome};
use hashquery_rs::Column;
use tracing::debug;

use super::config::Config;
use super::{default_column, unresolved_error, CommandContext, Result};
use crate::output::{format_rows_json, format_rows_table};

/// Options for the filter command.
#[derive(Debug, Default)]
pub struct FilterOptions {
    /// Search text.
    pub text: String,
    /// JSON rows file, or "-" for stdin.
    pub rows: PathBuf,
    /// Column for "#operator value" text.
    pub column: Option<String>,
    /// Limit results.
    pub limit: Option<usize>,
}

/// Reads an array of row objects from a file or stdin.
fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

/// Returns the name of the outcome variant as used in JSON output.
fn outcome_kind(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Empty => "empty",
        SearchOutcome::FreeText(_) => "freeText",
        SearchOutcome::Filter(_) => "filter",
        SearchOutcome::Typing(_) => "typing",
        SearchOutcome::Unresolved => "unresolved",
    }
}

/// Selects the rows the outcome matches.
///
/// Empty text and typing state without a preview keep every row.
fn select_rows<'a>(outcome: &SearchOutcome, rows: &'a [Row], catalog: &[Column]) -> Vec<&'a Row> {
    if let SearchOutcome::FreeText(text) = outcome {
        return rows
            .iter()
            .filter(|row| matches_free_text(row, text, catalog))
            .collect();
    }
    match outcome.filter() {
        Some(search) => FilterEvaluator::new(search).filter_rows(rows),
        None => rows.iter().collect(),
    }
}

/// Executes the filter command.
///
/// # Errors
///
/// Returns an error if the rows cannot be read or the text does not resolve.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &FilterOptions) -> Result<()> {
    let catalog = config.catalog()?;
    let default = default_column(
        catalog,
        opts.column.as_deref(),
        config.default_column.as_deref(),
    )?;

    let outcome = parse_search(&opts.text, default, catalog);
    if outcome == SearchOutcome::Unresolved {
        return Err(unresolved_error(&opts.text, catalog));
    }

    let rows = load_rows(&opts.rows)?;
    if ctx.verbose {
        eprintln!("Loaded {} rows from {}", rows.len(), opts.rows.display());
    }
    let mut matched = select_rows(&outcome, &rows, catalog);
    debug!(total = rows.len(), matched = matched.len(), kind = outcome_kind(&outcome), "filtered rows");

    if let Some(limit) = opts.limit {
        matched.truncate(limit);
    }

    if ctx.json_output {
        println!("{}", format_rows_json(outcome_kind(&outcome), rows.len(), &matched)?);
    } else if !ctx.quiet {
        print!("{}", format_rows_table(&matched, catalog, ctx.use_colors));
    }

    Ok(())
}
