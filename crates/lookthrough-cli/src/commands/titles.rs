//! Titles command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use lookthrough_portfolio::{TitleIndex, TitleOption};

use crate::cli::OutputFormat;
use crate::commands::{load_securities, Settings};
use crate::error::CliError;
use crate::output::{print_header, print_output};

/// Arguments for the titles command.
#[derive(Args, Debug)]
pub struct TitlesArgs {
    /// Security list JSON file
    #[arg(short, long)]
    pub securities: PathBuf,

    /// Filter (case-insensitive pattern, or plain text if not a valid pattern)
    pub filter: Option<String>,

    /// Resolve the filter as an exact title instead of searching
    #[arg(long, requires = "filter")]
    pub exact: bool,
}

/// A title row for display.
#[derive(Debug, Serialize, Tabled)]
struct TitleRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    label: String,
}

impl From<&TitleOption> for TitleRow {
    fn from(option: &TitleOption) -> Self {
        Self {
            id: option.id.to_string(),
            label: option.label.clone(),
        }
    }
}

/// Execute the titles command.
pub fn execute(args: TitlesArgs, settings: &Settings) -> Result<()> {
    let records = load_securities(&args.securities)?;
    let index = TitleIndex::new(&records);
    let filter = args.filter.unwrap_or_default();

    let rows: Vec<TitleRow> = if args.exact {
        let option = index
            .find_by_text(&filter)
            .ok_or_else(|| CliError::NoMatch(filter.clone()))?;
        vec![option.into()]
    } else {
        index.search(&filter).into_iter().map(TitleRow::from).collect()
    };

    if settings.format == OutputFormat::Table && !settings.quiet {
        print_header(&format!("Securities ({} of {})", rows.len(), index.len()));
    }
    print_output(&rows, settings.format)
}
