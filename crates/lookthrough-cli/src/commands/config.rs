//! Config command implementation.
//!
//! Manages CLI configuration settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use lookthrough_core::CollisionPolicy;

use crate::cli::OutputFormat;
use crate::commands::{parse_bool, parse_dimension, parse_format};
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LOOKTHROUGH_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Decimals shown for weights and exposures
    DecimalPrecision,
    /// Attribute label collision policy
    CollisionPolicy,
    /// Dimension reported by `analyze` when none is given
    DefaultDimension,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "collision_policy" | "collisions" => Some(Self::CollisionPolicy),
            "default_dimension" | "dimension" => Some(Self::DefaultDimension),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::CollisionPolicy => "collision_policy",
            Self::DefaultDimension => "default_dimension",
            Self::UseColors => "use_colors",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Number of decimal places for output (0-10)",
            Self::CollisionPolicy => {
                "Which attribute wins when labels normalize alike (first_wins, last_wins)"
            }
            Self::DefaultDimension => "Dimension reported by analyze (geography, sector, all)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "2",
            Self::CollisionPolicy => "first_wins",
            Self::DefaultDimension => "all",
            Self::UseColors => "true",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DecimalPrecision,
            Self::CollisionPolicy,
            Self::DefaultDimension,
            Self::UseColors,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    /// Loads the config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    /// Returns the stored value for `key`, or its default.
    pub fn value(&self, key: ConfigKey) -> String {
        self.get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.default_value().to_string())
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Get the config file path.
fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?;
    Ok(home.join("lookthrough").join("config.json"))
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    ConfigKey::from_str(key)
        .ok_or_else(|| CliError::Config(format!("Unknown configuration key: {key}")).into())
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(&get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
                .collect();
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, String> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: &GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let key = parse_key(&args.key)?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{value}");
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = parse_key(&args.key)?;
    let value = validate_config_value(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key.as_str().to_string(), value.clone());
    config.save()?;

    print_success(&format!("Set {} = {}", key.as_str(), value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            print_header("Available Configuration Keys");
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    if args.all {
        let mut config = Config::load().unwrap_or_default();
        config.clear();
        config.save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        let mut config = Config::load()?;
        config.remove(key.as_str());
        config.save()?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validates a configuration value and returns its canonical form.
pub fn validate_config_value(key: ConfigKey, value: &str) -> Result<String> {
    let invalid = |message: String| -> anyhow::Error { CliError::Config(message).into() };

    match key {
        ConfigKey::DefaultFormat => {
            if parse_format(value).is_none() {
                return Err(invalid(format!(
                    "Invalid format: {value}. Use table, json, csv, or minimal."
                )));
            }
            Ok(value.trim().to_lowercase())
        }
        ConfigKey::DecimalPrecision => {
            let precision: u32 = value
                .trim()
                .parse()
                .map_err(|_| invalid(format!("Invalid precision: {value}. Must be a number.")))?;
            if precision > 10 {
                return Err(invalid(format!(
                    "Invalid precision: {precision}. Must be between 0 and 10."
                )));
            }
            Ok(precision.to_string())
        }
        ConfigKey::CollisionPolicy => CollisionPolicy::from_code(value.trim())
            .map(|p| match p {
                CollisionPolicy::FirstWins => "first_wins".to_string(),
                CollisionPolicy::LastWins => "last_wins".to_string(),
            })
            .ok_or_else(|| {
                invalid(format!(
                    "Invalid collision policy: {value}. Use first_wins or last_wins."
                ))
            }),
        ConfigKey::DefaultDimension => {
            if parse_dimension(value).is_none() {
                return Err(invalid(format!(
                    "Invalid dimension: {value}. Use geography, sector, or all."
                )));
            }
            Ok(value.trim().to_lowercase())
        }
        ConfigKey::UseColors => parse_bool(value)
            .map(|b| b.to_string())
            .ok_or_else(|| invalid(format!("Invalid boolean: {value}. Use true or false."))),
    }
}
