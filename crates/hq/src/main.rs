use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{CatalogCommand, CatalogDispatch, StandaloneCommand, StandaloneDispatch};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                let rendered = serde_json::to_string_pretty(&error_json)
                    .unwrap_or_else(|_| error_json.to_string());
                eprintln!("{rendered}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_code(&e))
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` shows debug output and
/// everything else only warnings.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let mut ctx = CommandContext::from_cli(cli);

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let config = load_config(ctx.config_path.as_deref())?;
    if config.output.color == Some(false) {
        ctx.use_colors = false;
    }

    match CatalogDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &config),
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Catalog(_) => "CATALOG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
        CommandError::NoMatch(_) => "NO_MATCH",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> u8 {
    match e {
        CommandError::NoMatch(_) => 1,
        CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
        CommandError::Catalog(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashquery_rs::CatalogError;

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code(&CommandError::Config("x".into())), "CONFIG_ERROR");
        assert_eq!(error_code(&CommandError::NoMatch("x".into())), "NO_MATCH");
        assert_eq!(
            error_code(&CommandError::Catalog(CatalogError::duplicate_field("stock"))),
            "CATALOG_ERROR"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(error_exit_code(&CommandError::NoMatch("x".into())), 1);
        assert_eq!(error_exit_code(&CommandError::Config("x".into())), 5);
        assert_eq!(error_exit_code(&CommandError::Io(std::io::Error::other("x"))), 3);
    }
}
