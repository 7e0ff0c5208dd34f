//! Fields command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use lookthrough_core::normalize_label;

use crate::cli::{DimensionArg, OutputFormat};
use crate::commands::Settings;
use crate::output::{print_header, print_output};

/// Arguments for the fields command.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Dimension to list (defaults to all)
    #[arg(short, long, value_enum)]
    pub dimension: Option<DimensionArg>,
}

/// A field row for display.
#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Dimension")]
    dimension: &'static str,
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Matches")]
    key: String,
}

/// Execute the fields command.
pub fn execute(args: FieldsArgs, settings: &Settings) -> Result<()> {
    let rows: Vec<FieldRow> = args
        .dimension
        .unwrap_or(DimensionArg::All)
        .dimensions()
        .into_iter()
        .flat_map(|dimension| {
            dimension
                .fields()
                .iter()
                .enumerate()
                .map(move |(i, &field)| FieldRow {
                    dimension: dimension.code(),
                    position: i + 1,
                    field,
                    key: normalize_label(field),
                })
        })
        .collect();

    match settings.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.field);
            }
            Ok(())
        }
        format => {
            if format == OutputFormat::Table && !settings.quiet {
                print_header("Exposure Fields");
            }
            print_output(&rows, format)
        }
    }
}
