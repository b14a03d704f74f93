//! Pattern command implementation.
//!
//! Renders resolved search text again with a replacement value.

use hashquery_rs::filter::{build_search_pattern, parse_search};

use super::config::Config;
use super::{default_column, unresolved_error, CommandContext, Result};

/// Options for the pattern command.
#[derive(Debug, Default)]
pub struct PatternOptions {
    /// Search text that resolves to a filter.
    pub text: String,
    /// Replacement value.
    pub value: String,
}

/// Executes the pattern command.
///
/// # Errors
///
/// Returns an error if the text does not resolve to a filter.
pub fn execute(ctx: &CommandContext, config: &Config, opts: &PatternOptions) -> Result<()> {
    let catalog = config.catalog()?;
    let default = default_column(catalog, None, config.default_column.as_deref())?;

    let outcome = parse_search(&opts.text, default, catalog);
    let Some(search) = outcome.filter() else {
        return Err(unresolved_error(&opts.text, catalog));
    };
    let pattern = build_search_pattern(search, &opts.value);

    if ctx.json_output {
        let output = serde_json::json!({
            "pattern": pattern,
            "field": search.field,
            "operator": search.operator,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{pattern}");
    }

    Ok(())
}
