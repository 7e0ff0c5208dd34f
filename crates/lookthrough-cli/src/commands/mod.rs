//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod fields;
pub mod titles;
pub mod validate;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use fields::FieldsArgs;
pub use titles::TitlesArgs;
pub use validate::ValidateArgs;

use std::path::Path;

use lookthrough_core::{CollisionPolicy, SecurityRecord, SecurityTable, TargetPortfolio};
use lookthrough_portfolio::{AggregationConfig, DEFAULT_DISPLAY_PRECISION};

use crate::cli::{Cli, DimensionArg, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::print_warning;
use config::{Config, ConfigKey};

/// Effective settings: command-line flags over the config file over defaults.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub format: OutputFormat,
    pub precision: u32,
    pub collision_policy: CollisionPolicy,
    pub dimension: DimensionArg,
    pub use_colors: bool,
    pub quiet: bool,
}

impl Settings {
    /// Resolves settings for this invocation.
    ///
    /// An unreadable config file is reported and ignored.
    pub fn resolve(cli: &Cli) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            print_warning(&format!("Ignoring configuration file: {e}"));
            Config::default()
        });

        let format = cli.format.unwrap_or_else(|| {
            parse_format(&config.value(ConfigKey::DefaultFormat)).unwrap_or_default()
        });
        let precision = cli
            .precision
            .unwrap_or_else(|| configured_precision(&config.value(ConfigKey::DecimalPrecision)));
        let collision_policy = CollisionPolicy::from_code(&config.value(ConfigKey::CollisionPolicy))
            .unwrap_or_default();
        let dimension =
            parse_dimension(&config.value(ConfigKey::DefaultDimension)).unwrap_or(DimensionArg::All);
        let use_colors = !cli.no_color && parse_bool(&config.value(ConfigKey::UseColors)).unwrap_or(true);

        Self {
            format,
            precision,
            collision_policy,
            dimension,
            use_colors,
            quiet: cli.quiet,
        }
    }

    /// Aggregation configuration for these settings.
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig::new()
            .with_collision_policy(self.collision_policy)
            .with_display_precision(self.precision)
    }
}

/// Precision from a config value, range-checked like `config set`.
///
/// Out-of-range or malformed values fall back to the default with a warning.
fn configured_precision(raw: &str) -> u32 {
    config::validate_config_value(ConfigKey::DecimalPrecision, raw)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            print_warning(&format!(
                "Ignoring configured precision '{raw}', using {DEFAULT_DISPLAY_PRECISION}"
            ));
            DEFAULT_DISPLAY_PRECISION
        })
}

/// Parses an output format name.
pub fn parse_format(s: &str) -> Option<OutputFormat> {
    match s.trim().to_lowercase().as_str() {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "csv" => Some(OutputFormat::Csv),
        "minimal" => Some(OutputFormat::Minimal),
        _ => None,
    }
}

/// Parses a dimension selection.
pub fn parse_dimension(s: &str) -> Option<DimensionArg> {
    match s.trim().to_lowercase().as_str() {
        "geography" | "geo" => Some(DimensionArg::Geography),
        "sector" => Some(DimensionArg::Sector),
        "all" => Some(DimensionArg::All),
        _ => None,
    }
}

/// Parses a boolean setting.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a target portfolio JSON file.
pub fn load_portfolio(path: &Path) -> CliResult<TargetPortfolio> {
    let portfolio = TargetPortfolio::from_json(&read_file(path)?).map_err(|source| {
        CliError::Input {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(
        path = %path.display(),
        holdings = portfolio.len(),
        "loaded target portfolio"
    );
    Ok(portfolio)
}

/// Loads a security list JSON file.
pub fn load_securities(path: &Path) -> CliResult<Vec<SecurityRecord>> {
    let records = SecurityRecord::list_from_json(&read_file(path)?).map_err(|source| {
        CliError::Input {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded securities");
    Ok(records)
}

/// Loads a security list JSON file into a lookup table.
pub fn load_security_table(path: &Path) -> CliResult<SecurityTable> {
    Ok(load_securities(path)?.into())
}
