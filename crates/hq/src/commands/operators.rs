//! Operators command implementation.
//!
//! Lists the operators the picker would offer at the end of the text.

use hashquery_rs::filter::{operator_search_term, JoinOperator};
use hashquery_rs::{operator_suggestions, resolve_column, Column};

use super::config::Config;
use super::{unresolved_error, CommandContext, CommandError, Result};
use crate::output::{format_operators_json, format_operators_table};

/// Finds the column an operator typed at the end of `text` applies to.
///
/// The hashtag before the operator names the column, unless it is a join
/// keyword, in which case the first column of the text is reused.
fn operator_column<'a>(text: &str, catalog: &'a [Column]) -> Option<&'a Column> {
    let trimmed = text.trim_start();
    let prefix = &trimmed[..trimmed.rfind('#')?];
    let words: Vec<&str> = prefix.split_whitespace().collect();

    let previous = words.last()?.strip_prefix('#')?;
    if JoinOperator::from_keyword(previous).is_some() {
        let first = words.first()?.strip_prefix('#')?;
        return resolve_column(catalog, first);
    }
    resolve_column(catalog, previous)
}

/// Executes the operators command.
///
/// # Errors
///
/// Returns an error if the text does not end at an operator position or
/// names an unknown column.
pub fn execute(ctx: &CommandContext, config: &Config, text: &str) -> Result<()> {
    let catalog = config.catalog()?;

    let Some(term) = operator_search_term(text) else {
        return Err(CommandError::NoMatch(format!(
            "'{}' does not end at an operator position.",
            text.trim()
        )));
    };
    let column = operator_column(text, catalog).ok_or_else(|| unresolved_error(text, catalog))?;
    let operators = operator_suggestions(column.value_type, &term);

    if ctx.json_output {
        println!("{}", format_operators_json(column, &term, &operators)?);
    } else if !ctx.quiet {
        print!("{}", format_operators_table(&operators, ctx.use_colors));
    }

    Ok(())
}
