//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the hq CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// hq - Inspect and apply hashtag search-bar queries
#[derive(Parser, Debug)]
#[command(name = "hq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to load the column catalog from (default: HQ_CONFIG or ~/.config/hq/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse search text and show the resolved filter
    #[command(alias = "p")]
    Parse {
        /// Search text (e.g., "#stock #gt 10 #and #lt 50##")
        text: String,

        /// Column used by "#operator value" text (default: from config)
        #[arg(short, long)]
        column: Option<String>,
    },

    /// Show the live picker state for multi-condition text being typed
    State {
        /// Search text without the trailing "##"
        text: String,
    },

    /// List operators offered at the end of the text
    Operators {
        /// Search text ending at an operator position (e.g., "#stock #gr")
        text: String,
    },

    /// List columns matching a partial name
    Columns {
        /// Partial column name (default: all searchable columns)
        partial: Option<String>,
    },

    /// Filter rows from a JSON file
    #[command(alias = "f")]
    Filter {
        /// Search text
        text: String,

        /// JSON file holding an array of row objects ("-" for stdin)
        #[arg(short, long, value_name = "FILE")]
        rows: PathBuf,

        /// Column used by "#operator value" text (default: from config)
        #[arg(short, long)]
        column: Option<String>,

        /// Limit results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Render search text again with a new value
    Pattern {
        /// Search text that resolves to a filter
        text: String,

        /// Replacement value
        #[arg(long)]
        value: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let cli = Cli::parse_from(["hq"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["hq", "--json", "--no-color", "columns"]);
        assert!(cli.json);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        assert!(Cli::try_parse_from(["hq", "-v", "-q", "columns"]).is_err());
    }

    #[test]
    fn test_parse_with_column() {
        let cli = Cli::parse_from(["hq", "parse", "#gt 10", "--column", "stock"]);
        if let Some(Commands::Parse { text, column }) = cli.command {
            assert_eq!(text, "#gt 10");
            assert_eq!(column.as_deref(), Some("stock"));
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_parse_alias() {
        let cli = Cli::parse_from(["hq", "p", "#name:asp"]);
        assert!(matches!(cli.command, Some(Commands::Parse { .. })));
    }

    #[test]
    fn test_filter_requires_rows() {
        assert!(Cli::try_parse_from(["hq", "filter", "#name:asp"]).is_err());

        let cli = Cli::parse_from(["hq", "filter", "#name:asp", "--rows", "rows.json", "--limit", "3"]);
        if let Some(Commands::Filter { rows, limit, .. }) = cli.command {
            assert_eq!(rows, PathBuf::from("rows.json"));
            assert_eq!(limit, Some(3));
        } else {
            panic!("Expected Filter command");
        }
    }

    #[test]
    fn test_pattern_requires_value() {
        assert!(Cli::try_parse_from(["hq", "pattern", "#stock #gt 1"]).is_err());
        assert!(Cli::try_parse_from(["hq", "pattern", "#stock #gt 1", "--value", "5"]).is_ok());
    }

    #[test]
    fn test_config_path_flag_is_global() {
        let cli = Cli::parse_from(["hq", "columns", "--config", "/tmp/hq.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/hq.toml")));
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["hq", "config", "init", "--force"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Init { force }),
        }) = cli.command
        {
            assert!(force);
        } else {
            panic!("Expected Config Init command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["hq", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
