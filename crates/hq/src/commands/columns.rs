//! Columns command implementation.
//!
//! Lists the columns the picker would offer for a partial name.

use hashquery_rs::column_suggestions;

use super::config::Config;
use super::{CommandContext, Result};
use crate::output::{format_columns_json, format_columns_table};

/// Executes the columns command.
///
/// # Errors
///
/// Returns an error if the catalog is invalid.
pub fn execute(ctx: &CommandContext, config: &Config, partial: Option<&str>) -> Result<()> {
    let catalog = config.catalog()?;
    let columns = column_suggestions(catalog, partial.unwrap_or(""));

    if ctx.json_output {
        println!("{}", format_columns_json(&columns)?);
    } else if !ctx.quiet {
        print!("{}", format_columns_table(&columns, ctx.use_colors));
    }

    Ok(())
}
