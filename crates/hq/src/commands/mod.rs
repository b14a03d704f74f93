//! Command implementations for the hq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod columns;
pub mod completions;
pub mod config;
pub mod filter;
pub mod operators;
pub mod parse;
pub mod pattern;
pub mod state;

use std::path::PathBuf;

use hashquery_rs::{resolve_column, Column};
use strsim::levenshtein;

use crate::cli::Cli;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid column catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] hashquery_rs::CatalogError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Search text that cannot be interpreted.
    #[error("{0}")]
    NoMatch(String),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Config file given on the command line.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            config_path: cli.config.clone(),
        }
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    // Only suggest if the distance is within threshold and not an exact match
    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Builds the error for search text that did not resolve.
///
/// When the leading hashtag names no known column, the closest field is
/// offered as a hint.
pub(crate) fn unresolved_error(text: &str, catalog: &[Column]) -> CommandError {
    let token = text
        .trim_start()
        .trim_start_matches('#')
        .split(|c: char| c.is_whitespace() || c == '#' || c == ':')
        .next()
        .unwrap_or("");

    if !token.is_empty() && resolve_column(catalog, token).is_none() {
        let candidates = catalog
            .iter()
            .flat_map(|c| [c.field.as_str(), c.display_name.as_str()]);
        let base = format!("Column '{token}' not found.");
        return CommandError::NoMatch(match find_similar_name(token, candidates) {
            Some(s) => format!("{base} Did you mean '{s}'?"),
            None => base,
        });
    }

    CommandError::NoMatch(format!("Could not interpret search text '{}'.", text.trim()))
}

/// Resolves the column named by `--column`, falling back to the configured default.
pub(crate) fn default_column<'a>(
    catalog: &'a [Column],
    flag: Option<&str>,
    configured: Option<&str>,
) -> Result<Option<&'a Column>> {
    let Some(name) = flag.or(configured) else {
        return Ok(None);
    };
    match resolve_column(catalog, name) {
        Some(column) => Ok(Some(column)),
        None => {
            let candidates = catalog.iter().map(|c| c.field.as_str());
            let base = format!("Column '{name}' not found.");
            Err(CommandError::NoMatch(match find_similar_name(name, candidates) {
                Some(s) => format!("{base} Did you mean '{s}'?"),
                None => base,
            }))
        }
    }
}
