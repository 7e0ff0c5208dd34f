//! Lookthrough CLI - Command-line interface for portfolio exposure analytics.
//!
//! # Usage
//!
//! ```bash
//! # Geographic and sector exposure of a target portfolio
//! lookthrough analyze --portfolio portfolio.json --securities securities.json --dimension all
//!
//! # Exposure to a custom list of fields
//! lookthrough analyze -p portfolio.json -s securities.json --field USA --field France
//!
//! # Check weights before saving
//! lookthrough validate --portfolio portfolio.json
//!
//! # Search securities by label
//! lookthrough titles --securities securities.json "msci"
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; library crates log through `log`, bridged here
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("lookthrough=debug,lookthrough_core=debug,lookthrough_portfolio=debug")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::resolve(&cli);
    if !settings.use_colors {
        colored::control::set_override(false);
    }
    tracing::debug!(?settings, "resolved settings");

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &settings)?,
        Commands::Validate(args) => commands::validate::execute(args, &settings)?,
        Commands::Titles(args) => commands::titles::execute(args, &settings)?,
        Commands::Fields(args) => commands::fields::execute(args, &settings)?,
        Commands::Config(args) => commands::config::execute(args, settings.format)?,
    }

    Ok(())
}
