//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use lookthrough_portfolio::ExposureDimension;

use crate::commands::{AnalyzeArgs, ConfigArgs, FieldsArgs, TitlesArgs, ValidateArgs};

/// Lookthrough - Look-through exposure analytics for target portfolios
#[derive(Parser)]
#[command(name = "lookthrough")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Decimals shown for weights and exposures
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub precision: Option<u32>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Project a target portfolio onto geographic or sector exposure
    Analyze(AnalyzeArgs),

    /// Check a target portfolio against the write-time rules
    Validate(ValidateArgs),

    /// List or search security titles
    Titles(TitlesArgs),

    /// List the configured exposure fields
    Fields(FieldsArgs),

    /// Manage configurations
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (totals only)
    Minimal,
}

/// Exposure dimension selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DimensionArg {
    /// Country exposure
    Geography,
    /// Industry sector exposure
    Sector,
    /// Both dimensions
    All,
}

impl DimensionArg {
    /// Dimensions covered by this selection, in report order.
    pub fn dimensions(self) -> Vec<ExposureDimension> {
        match self {
            Self::Geography => vec![ExposureDimension::Geography],
            Self::Sector => vec![ExposureDimension::Sector],
            Self::All => ExposureDimension::ALL.to_vec(),
        }
    }
}
