//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/hq/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use hashquery_rs::{validate_catalog, Column};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r##"# hq - hashtag query configuration

# Config schema version (do not modify)
version = 1

# Column used by "#operator value" text
default_column = "name"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Column catalog. valueType is one of: text, number, date, boolean
[[columns]]
field = "name"
displayName = "Name"

[[columns]]
field = "stock"
displayName = "Stock"
valueType = "number"

[[columns]]
field = "expires"
displayName = "Expiry Date"
valueType = "date"
"##;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Column used when search text omits one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_column: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Column catalog.
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            default_column: None,
            output: OutputConfig::default(),
            columns: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the validated column catalog.
    pub fn catalog(&self) -> Result<&[Column]> {
        validate_catalog(&self.columns)?;
        Ok(&self.columns)
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config file path.
///
/// The resolution order is:
/// 1. `--config` command line flag
/// 2. `HQ_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/hq/config.toml`
/// 4. `~/.config/hq/config.toml`
pub fn get_config_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    // Check for override env var first
    if let Ok(path) = env::var("HQ_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    // Use XDG_CONFIG_HOME if set, otherwise ~/.config/hq
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("hq").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("hq").join("config.toml"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Loads the configuration from disk.
///
/// A missing file yields the default config with an empty catalog.
pub fn load_config(flag: Option<&Path>) -> Result<Config> {
    let path = get_config_path(flag)?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    debug!(path = %path.display(), columns = config.columns.len(), "loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    // Ensure version is current
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let config = load_config(Some(&path))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref column) = config.default_column {
                println!("  default_column: {}", column);
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            println!("\n[[columns]] ({})", config.columns.len());
            for column in &config.columns {
                println!("  {} ({})", column.field, column.value_type);
            }
        } else {
            println!("(No config file exists. Run 'hq config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created config at: {}", path.display());
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashquery_rs::ValueType;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Runs `f` with `HQ_CONFIG` and `XDG_CONFIG_HOME` set as given, restoring them after.
    fn with_env<T>(hq_config: Option<&str>, xdg: Option<&str>, f: impl FnOnce() -> T) -> T {
        let original_config = env::var("HQ_CONFIG").ok();
        let original_xdg = env::var("XDG_CONFIG_HOME").ok();

        match hq_config {
            Some(v) => env::set_var("HQ_CONFIG", v),
            None => env::remove_var("HQ_CONFIG"),
        }
        match xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        let result = f();

        match original_config {
            Some(v) => env::set_var("HQ_CONFIG", v),
            None => env::remove_var("HQ_CONFIG"),
        }
        match original_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        result
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.default_column.is_none());
        assert!(config.output.color.is_none());
        assert!(config.columns.is_empty());
    }

    #[test]
    fn test_parse_default_config_template() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.default_column.as_deref(), Some("name"));
        assert_eq!(config.columns.len(), 3);
        assert_eq!(config.columns[0].value_type, ValueType::Text);
        assert!(config.columns[0].searchable);
        assert_eq!(config.columns[2].value_type, ValueType::Date);
        assert_eq!(config.columns[2].display_name, "Expiry Date");
        assert!(config.catalog().is_ok());
    }

    #[test]
    fn test_config_without_version_defaults_to_current() {
        let config: Config = toml::from_str("default_column = \"x\"").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_migrate_rejects_newer_version() {
        let config = Config {
            version: CONFIG_VERSION + 1,
            ..Config::default()
        };
        assert!(matches!(migrate_config(config), Err(CommandError::Config(_))));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let config = Config {
            columns: vec![
                Column::new("stock", "Stock", ValueType::Number),
                Column::new("STOCK", "Units", ValueType::Number),
            ],
            ..Config::default()
        };
        assert!(matches!(config.catalog(), Err(CommandError::Catalog(_))));
    }

    #[test]
    #[serial]
    fn test_config_path_flag_wins() {
        let path = with_env(Some("/tmp/from-env.toml"), None, || {
            get_config_path(Some(Path::new("/tmp/from-flag.toml"))).unwrap()
        });
        assert_eq!(path, PathBuf::from("/tmp/from-flag.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        let path = with_env(Some("/tmp/from-env.toml"), Some("/tmp/xdg"), || {
            get_config_path(None).unwrap()
        });
        assert_eq!(path, PathBuf::from("/tmp/from-env.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_from_xdg() {
        let path = with_env(None, Some("/tmp/xdg"), || get_config_path(None).unwrap());
        assert_eq!(path, PathBuf::from("/tmp/xdg/hq/config.toml"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(Some(&temp_dir.path().join("missing.toml"))).unwrap();
        assert!(config.columns.is_empty());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "columns = 5").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(CommandError::Config(_))));
    }

    #[test]
    fn test_init_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            config_path: Some(path.clone()),
        };

        execute_init(&ctx, false).unwrap();
        assert!(path.exists());
        assert!(matches!(execute_init(&ctx, false), Err(CommandError::Config(_))));
        execute_init(&ctx, true).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
        assert!(written.contains("# Column used by \"#operator value\" text"));

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.default_column.as_deref(), Some("name"));
        let fields: Vec<&str> = config
            .catalog()
            .unwrap()
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "stock", "expires"]);
    }
}
