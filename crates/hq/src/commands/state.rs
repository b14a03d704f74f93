//! State command implementation.
//!
//! Shows the picker state derived from multi-condition text still being typed.

use hashquery_rs::filter::parse_incremental;

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::output::format_state_table;

/// Executes the state command.
///
/// # Errors
///
/// Returns an error if the catalog is invalid or the text is not an
/// unconfirmed multi-condition search.
pub fn execute(ctx: &CommandContext, config: &Config, text: &str) -> Result<()> {
    let catalog = config.catalog()?;

    let Some(state) = parse_incremental(text, catalog) else {
        return Err(CommandError::NoMatch(format!(
            "'{}' is not an unconfirmed multi-condition search.",
            text.trim()
        )));
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else if !ctx.quiet {
        print!("{}", format_state_table(&state, ctx.use_colors));
    }

    Ok(())
}
