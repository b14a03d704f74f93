//! Parse command implementation.
//!
//! Resolves search text against the configured catalog and prints the result.

use hashquery_rs::filter::{parse_search, SearchOutcome};

use super::config::Config;
use super::{default_column, unresolved_error, CommandContext, Result};
use crate::output::{format_outcome_json, format_outcome_table};

/// Options for the parse command.
#[derive(Debug, Default)]
pub struct ParseOptions {
    /// Search text.
    pub text: String,
    /// Column for "#operator value" text.
    pub column: Option<String>,
}

/// Executes the parse command.
///
/// # Errors
///
/// Returns an error if the catalog is invalid or the text does not resolve.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &ParseOptions) -> Result<()> {
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

    if ctx.json_output {
        println!("{}", format_outcome_json(&outcome)?);
    } else if !ctx.quiet {
        print!("{}", format_outcome_table(&outcome, ctx.use_colors));
    }

    Ok(())
}
