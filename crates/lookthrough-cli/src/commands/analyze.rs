//! Analyze command implementation.
//!
//! Projects a target portfolio through its securities' compositions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use lookthrough_core::{SecurityId, SecurityTable, TargetPortfolio};
use lookthrough_portfolio::{
    aggregate_dimension, aggregate_exposure, AggregationConfig, DisplayRow, ExposureDimension,
    ExposureTable,
};

use crate::cli::{DimensionArg, OutputFormat};
use crate::commands::{load_portfolio, load_security_table, Settings};
use crate::output::{print_grid, print_header, print_json, print_warning, write_csv_grid};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Target portfolio JSON file
    #[arg(short, long)]
    pub portfolio: PathBuf,

    /// Security list JSON file
    #[arg(short, long)]
    pub securities: PathBuf,

    /// Exposure dimension (defaults to the configured dimension)
    #[arg(short, long, value_enum)]
    pub dimension: Option<DimensionArg>,

    /// Report these fields instead of a dimension (repeatable)
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,
}

/// One aggregated table and the dimension it came from.
struct Section {
    dimension: Option<ExposureDimension>,
    table: ExposureTable,
}

impl Section {
    fn title(&self) -> String {
        let what = self.dimension.map_or("Custom", |d| d.name());
        format!("{what} exposure - {}", self.table.portfolio)
    }
}

/// Serialized form of a section.
#[derive(Serialize)]
struct SectionReport<'a> {
    portfolio: &'a str,
    dimension: Option<&'static str>,
    fields: &'a [String],
    rows: Vec<DisplayRow>,
    total: DisplayRow,
    unresolved: Vec<&'a SecurityId>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, settings: &Settings) -> Result<()> {
    let portfolio = load_portfolio(&args.portfolio)?;
    let securities = load_security_table(&args.securities)?;
    let config = settings.aggregation();

    let sections = build_sections(&portfolio, &securities, &args, settings, &config);

    if !settings.quiet {
        report_unresolved(&sections);
    }

    let precision = config.display_precision;
    match settings.format {
        OutputFormat::Table => {
            for section in &sections {
                if !settings.quiet {
                    print_header(&section.title());
                }
                let (header, rows) = grid(&section.table, precision);
                print_grid(&header, &rows);
            }
        }
        OutputFormat::Json => {
            let reports: Vec<SectionReport<'_>> = sections
                .iter()
                .map(|s| SectionReport {
                    portfolio: &s.table.portfolio,
                    dimension: s.dimension.map(|d| d.code()),
                    fields: &s.table.fields,
                    rows: s.table.display_rows(precision),
                    total: s.table.display_totals(precision),
                    unresolved: s
                        .table
                        .unresolved()
                        .into_iter()
                        .map(|r| &r.security)
                        .collect(),
                })
                .collect();
            print_json(&reports)?;
        }
        OutputFormat::Csv => {
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                let (header, rows) = grid(&section.table, precision);
                write_csv_grid(&header, &rows)?;
            }
        }
        OutputFormat::Minimal => {
            for section in &sections {
                let totals = section.table.display_totals(precision);
                for (field, value) in section.table.fields.iter().zip(&totals.values) {
                    println!("{field}={value}");
                }
            }
        }
    }

    Ok(())
}

fn build_sections(
    portfolio: &TargetPortfolio,
    securities: &SecurityTable,
    args: &AnalyzeArgs,
    settings: &Settings,
    config: &AggregationConfig,
) -> Vec<Section> {
    if !args.fields.is_empty() {
        return vec![Section {
            dimension: None,
            table: aggregate_exposure(portfolio, securities, &args.fields, config),
        }];
    }

    args.dimension
        .unwrap_or(settings.dimension)
        .dimensions()
        .into_iter()
        .map(|dimension| Section {
            dimension: Some(dimension),
            table: aggregate_dimension(portfolio, securities, dimension, config),
        })
        .collect()
}

/// Warns once per holding whose security is missing.
fn report_unresolved(sections: &[Section]) {
    let Some(first) = sections.first() else {
        return;
    };
    for row in first.table.unresolved() {
        print_warning(&format!(
            "Security {} not found; its {}% line reports zero exposure",
            row.security, row.weight
        ));
    }
}

/// Header and body rows (including the totals row) for display.
fn grid(table: &ExposureTable, precision: u32) -> (Vec<String>, Vec<Vec<String>>) {
    let header: Vec<String> = ["Security".to_string(), "Weight".to_string()]
        .into_iter()
        .chain(table.fields.iter().cloned())
        .collect();

    let rows = table
        .display_rows(precision)
        .into_iter()
        .chain(std::iter::once(table.display_totals(precision)))
        .map(|row| {
            std::iter::once(row.name)
                .chain(std::iter::once(row.weight.to_string()))
                .chain(row.values.iter().map(ToString::to_string))
                .collect()
        })
        .collect();

    (header, rows)
}
