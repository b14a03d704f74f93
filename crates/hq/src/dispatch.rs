//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into two groups: those that work on the configured column
//! catalog, and those that do not need it loaded (config, completions, help).

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::config::Config;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without loading the catalog.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that work on the configured catalog.
pub trait CatalogCommand {
    /// Execute the command against the loaded config.
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()>;
}

/// Commands that don't need the catalog.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs the catalog.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("hq - hashtag search-bar queries");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}

/// Commands that work on the catalog.
pub enum CatalogDispatch {
    Parse(commands::parse::ParseOptions),
    State(String),
    Operators(String),
    Columns(Option<String>),
    Filter(commands::filter::FilterOptions),
    Pattern(commands::pattern::PatternOptions),
}

impl CatalogDispatch {
    /// Create a catalog dispatch from the CLI command.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let dispatch = match cli.command.as_ref()? {
            Commands::Parse { text, column } => Self::Parse(commands::parse::ParseOptions {
                text: text.clone(),
                column: column.clone(),
            }),
            Commands::State { text } => Self::State(text.clone()),
            Commands::Operators { text } => Self::Operators(text.clone()),
            Commands::Columns { partial } => Self::Columns(partial.clone()),
            Commands::Filter {
                text,
                rows,
                column,
                limit,
            } => Self::Filter(commands::filter::FilterOptions {
                text: text.clone(),
                rows: rows.clone(),
                column: column.clone(),
                limit: *limit,
            }),
            Commands::Pattern { text, value } => Self::Pattern(commands::pattern::PatternOptions {
                text: text.clone(),
                value: value.clone(),
            }),
            Commands::Config { .. } | Commands::Completions { .. } => return None,
        };
        Some(dispatch)
    }
}

impl CatalogCommand for CatalogDispatch {
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()> {
        match self {
            Self::Parse(opts) => commands::parse::execute(ctx, config, opts),
            Self::State(text) => commands::state::execute(ctx, config, text),
            Self::Operators(text) => commands::operators::execute(ctx, config, text),
            Self::Columns(partial) => commands::columns::execute(ctx, config, partial.as_deref()),
            Self::Filter(opts) => commands::filter::execute(ctx, config, opts),
            Self::Pattern(opts) => commands::pattern::execute(ctx, config, opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_standalone_commands() {
        let cli = Cli::parse_from(["hq"]);
        assert!(matches!(StandaloneDispatch::try_from_cli(&cli), Some(StandaloneDispatch::Help)));

        let cli = Cli::parse_from(["hq", "config", "path"]);
        assert!(matches!(StandaloneDispatch::try_from_cli(&cli), Some(StandaloneDispatch::Config(_))));
        assert!(CatalogDispatch::from_cli(&cli).is_none());
    }

    #[test]
    fn test_catalog_commands() {
        let cli = Cli::parse_from(["hq", "filter", "#name:a", "--rows", "-", "--limit", "2"]);
        assert!(StandaloneDispatch::try_from_cli(&cli).is_none());
        match CatalogDispatch::from_cli(&cli) {
            Some(CatalogDispatch::Filter(opts)) => {
                assert_eq!(opts.text, "#name:a");
                assert_eq!(opts.limit, Some(2));
            }
            _ => panic!("Expected Filter dispatch"),
        }
    }
}
