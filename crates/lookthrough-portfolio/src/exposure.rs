//! Weighted exposure aggregation.
//!
//! For each holding of a target portfolio, looks up the referenced security
//! and multiplies the holding weight by the security's own composition for
//! every requested field:
//!
//! ```text
//! exposure(holding, field) = weight% × field% / 100
//! ```
//!
//! A 60% holding in a fund that is 50% USA contributes 30% USA exposure.
//! Summing a column gives the portfolio-level exposure for that field.

use crate::config::AggregationConfig;
use crate::fields::ExposureDimension;
use lookthrough_core::types::NAME_LABEL;
use lookthrough_core::{Holding, NormalizedAttributes, SecurityId, SecurityTable, TargetPortfolio};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Exposure of one holding (or of the whole portfolio) to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExposure {
    /// Field name, as requested by the caller.
    pub field: String,

    /// Exposure in percent of the portfolio.
    pub value: f64,
}

impl FieldExposure {
    /// Creates a field exposure.
    #[must_use]
    pub fn new(field: impl Into<String>, value: f64) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// One holding projected onto the requested exposure fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRow {
    /// Line identifier of the holding, if any.
    pub line_id: Option<u64>,

    /// Referenced security.
    pub security: SecurityId,

    /// Display name (`Nom` attribute, else title, else `#<id>`).
    pub name: String,

    /// Holding weight in percent.
    pub weight: f64,

    /// False when the referenced security was not found.
    pub resolved: bool,

    /// Exposures in the caller's field order.
    pub exposures: Vec<FieldExposure>,
}

impl ExposureRow {
    /// Returns the exposure for `field` (exact field name as requested).
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.exposures
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.value)
    }

    /// Returns the exposure values in field order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.exposures.iter().map(|e| e.value).collect()
    }

    /// Rounds the row for display.
    #[must_use]
    pub fn rounded(&self, precision: u32) -> DisplayRow {
        DisplayRow {
            name: self.name.clone(),
            weight: round_for_display(self.weight, precision),
            values: self
                .exposures
                .iter()
                .map(|e| round_for_display(e.value, precision))
                .collect(),
        }
    }
}

/// A row rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Display name.
    pub name: String,

    /// Rounded weight.
    pub weight: Decimal,

    /// Rounded exposures, in field order.
    pub values: Vec<Decimal>,
}

/// Result of aggregating a portfolio over a list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureTable {
    /// Portfolio name.
    pub portfolio: String,

    /// Requested fields, in order.
    pub fields: Vec<String>,

    /// One row per holding, in holding order.
    pub rows: Vec<ExposureRow>,
}

impl ExposureTable {
    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of holding weights, in percent.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    /// Portfolio-level exposure per field (column sums), in field order.
    #[must_use]
    pub fn column_totals(&self) -> Vec<FieldExposure> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let total = self
                    .rows
                    .iter()
                    .filter_map(|r| r.exposures.get(i))
                    .map(|e| e.value)
                    .sum();
                FieldExposure::new(field.clone(), total)
            })
            .collect()
    }

    /// Portfolio-level exposure for one field.
    #[must_use]
    pub fn total_for(&self, field: &str) -> Option<f64> {
        let index = self.fields.iter().position(|f| f == field)?;
        Some(
            self.rows
                .iter()
                .filter_map(|r| r.exposures.get(index))
                .map(|e| e.value)
                .sum(),
        )
    }

    /// Rows whose security could not be found.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&ExposureRow> {
        self.rows.iter().filter(|r| !r.resolved).collect()
    }

    /// All rows rounded for display.
    #[must_use]
    pub fn display_rows(&self, precision: u32) -> Vec<DisplayRow> {
        self.rows.iter().map(|r| r.rounded(precision)).collect()
    }

    /// Totals row rounded for display.
    #[must_use]
    pub fn display_totals(&self, precision: u32) -> DisplayRow {
        DisplayRow {
            name: "Total".to_string(),
            weight: round_for_display(self.total_weight(), precision),
            values: self
                .column_totals()
                .iter()
                .map(|t| round_for_display(t.value, precision))
                .collect(),
        }
    }
}

/// Rounds a value to `precision` decimals, midpoint away from zero.
///
/// The exact binary value of the float is rounded, so `1.005` (stored as
/// `1.00499…`) rounds to `1.00`. Non-finite input gives zero.
#[must_use]
pub fn round_for_display(value: f64, precision: u32) -> Decimal {
    let mut rounded = Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    // Pad to a fixed number of decimals ("30" -> "30.00")
    rounded.rescale(precision);
    rounded
}

/// Aggregates weighted exposure for each holding over `fields`.
///
/// Rows follow holding order and exposures follow `fields` order. A holding
/// whose security is missing from `securities` still produces a row, named
/// `#<id>` with every exposure at zero.
///
/// # Arguments
///
/// * `portfolio` - Target portfolio to project
/// * `securities` - Security records indexed by id
/// * `fields` - Exposure fields to report, in order
/// * `config` - Aggregation configuration (label collision policy)
///
/// # Example
///
/// ```
/// use lookthrough_core::{SecurityRecord, SecurityTable, TargetPortfolio};
/// use lookthrough_portfolio::{aggregate_exposure, AggregationConfig};
///
/// let securities: SecurityTable = vec![
///     SecurityRecord::new(1, "A").with_attribute("Nom", "A").with_attribute("USA", "50"),
///     SecurityRecord::new(2, "B").with_attribute("Nom", "B").with_attribute("USA", "10"),
/// ]
/// .into();
/// let portfolio = TargetPortfolio::new("P").with_holding(1, 60.0).with_holding(2, 40.0);
///
/// let table = aggregate_exposure(&portfolio, &securities, &["USA"], &AggregationConfig::default());
/// assert_eq!(table.rows[0].get("USA"), Some(30.0));
/// assert_eq!(table.rows[1].get("USA"), Some(4.0));
/// assert_eq!(table.total_for("USA"), Some(34.0));
/// ```
#[must_use]
pub fn aggregate_exposure<S: AsRef<str>>(
    portfolio: &TargetPortfolio,
    securities: &SecurityTable,
    fields: &[S],
    config: &AggregationConfig,
) -> ExposureTable {
    let rows = portfolio
        .holdings
        .iter()
        .map(|holding| project_holding(holding, securities, fields, config))
        .collect();

    ExposureTable {
        portfolio: portfolio.name.clone(),
        fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        rows,
    }
}

/// Aggregates over the configured field set of a dimension.
#[must_use]
pub fn aggregate_dimension(
    portfolio: &TargetPortfolio,
    securities: &SecurityTable,
    dimension: ExposureDimension,
    config: &AggregationConfig,
) -> ExposureTable {
    aggregate_exposure(portfolio, securities, dimension.fields(), config)
}

fn project_holding<S: AsRef<str>>(
    holding: &Holding,
    securities: &SecurityTable,
    fields: &[S],
    config: &AggregationConfig,
) -> ExposureRow {
    let weight = holding.weight;

    let Some(record) = securities.get(&holding.security) else {
        log::debug!(
            "holding references unknown security {}, reporting zero exposure",
            holding.security
        );
        return ExposureRow {
            line_id: holding.id,
            security: holding.security.clone(),
            name: holding.security.fallback_label(),
            weight,
            resolved: false,
            exposures: fields
                .iter()
                .map(|f| FieldExposure::new(f.as_ref(), 0.0))
                .collect(),
        };
    };

    let attributes = NormalizedAttributes::new(&record.attributes, config.collision_policy);

    let name = attributes
        .text(NAME_LABEL)
        .or_else(|| record.title().map(str::to_string))
        .unwrap_or_else(|| record.id.fallback_label());

    let exposures = fields
        .iter()
        .map(|f| {
            let field = f.as_ref();
            FieldExposure::new(field, weight * attributes.number(field) / 100.0)
        })
        .collect();

    ExposureRow {
        line_id: holding.id,
        security: holding.security.clone(),
        name,
        weight,
        resolved: true,
        exposures,
    }
}
