//! Validate command implementation.
//!
//! Checks a target portfolio against the rules applied before saving.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use lookthrough_core::SecurityId;
use lookthrough_portfolio::{validate_target_portfolio, weight_summary};

use crate::cli::OutputFormat;
use crate::commands::{load_portfolio, load_security_table, Settings};
use crate::output::{print_header, print_json, print_output, print_success, print_warning, KeyValue};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Target portfolio JSON file
    #[arg(short, long)]
    pub portfolio: PathBuf,

    /// Security list JSON file, to report holdings with unknown securities
    #[arg(short, long)]
    pub securities: Option<PathBuf>,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    portfolio: &'a str,
    holdings: usize,
    total_weight: String,
    balanced: bool,
    valid: bool,
    error: Option<String>,
    unknown_securities: Vec<&'a SecurityId>,
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, settings: &Settings) -> Result<()> {
    let portfolio = load_portfolio(&args.portfolio)?;

    let unknown: Vec<&SecurityId> = match &args.securities {
        Some(path) => {
            let securities = load_security_table(path)?;
            portfolio
                .holdings
                .iter()
                .map(|h| &h.security)
                .filter(|id| !securities.contains(id))
                .collect()
        }
        None => Vec::new(),
    };

    let summary = weight_summary(&portfolio);
    let outcome = validate_target_portfolio(&portfolio);

    let report = ValidationReport {
        portfolio: &portfolio.name,
        holdings: portfolio.len(),
        total_weight: summary.total.to_string(),
        balanced: summary.balanced,
        valid: outcome.is_ok(),
        error: outcome.as_ref().err().map(ToString::to_string),
        unknown_securities: unknown.clone(),
    };

    match settings.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Minimal => println!("{}", if report.valid { "valid" } else { "invalid" }),
        format => {
            let rows = vec![
                KeyValue::new("Portfolio", report.portfolio),
                KeyValue::new("Holdings", report.holdings.to_string()),
                KeyValue::new("Total weight", format!("{}%", report.total_weight)),
                KeyValue::new("Balanced", report.balanced.to_string()),
            ];
            if format == OutputFormat::Table && !settings.quiet {
                print_header("Target Portfolio");
            }
            print_output(&rows, format)?;
        }
    }

    if !settings.quiet {
        for id in &unknown {
            print_warning(&format!("Security {id} not found in the security list"));
        }
    }

    // Reported once, by `main`
    outcome.with_context(|| format!("Portfolio '{}' is invalid", portfolio.name))?;

    if settings.format == OutputFormat::Table && !settings.quiet {
        print_success("Portfolio is valid");
    }
    Ok(())
}
