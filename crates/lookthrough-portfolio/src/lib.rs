//! # Lookthrough Portfolio
//!
//! Look-through exposure analytics for target portfolios of funds.
//!
//! A target portfolio allocates weights to securities (funds, ETFs). Each
//! security record carries its own geographic and sector composition. This
//! crate projects the portfolio through those compositions to report what
//! the portfolio is actually exposed to.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: aggregation is stateless with explicit inputs
//! - **Never fails**: missing labels, malformed values and dangling
//!   references contribute zero rather than erroring
//! - **Caller-controlled layout**: rows follow holdings, columns follow the
//!   requested field list
//!
//! ## Features
//!
//! - **Exposure aggregation**: weight × composition for any field list
//! - **Field sets**: fixed geography and sector columns
//! - **Validation**: write-time checks on weights and duplicates
//! - **Title index**: resolve and search securities by label
//!
//! ## Quick Start
//!
//! ```rust
//! use lookthrough_portfolio::prelude::*;
//!
//! let securities: SecurityTable = vec![
//!     SecurityRecord::new(1, "A").with_attribute("Nom", "A").with_attribute("USA", "50"),
//!     SecurityRecord::new(2, "B").with_attribute("Nom", "B").with_attribute("USA", "10"),
//! ]
//! .into();
//! let portfolio = TargetPortfolio::new("P").with_holding(1, 60.0).with_holding(2, 40.0);
//!
//! let config = AggregationConfig::default();
//! let table = aggregate_dimension(&portfolio, &securities, ExposureDimension::Geography, &config);
//!
//! assert_eq!(table.total_for("USA"), Some(34.0));
//! assert!(validate_target_portfolio(&portfolio).is_ok());
//! ```
//!
//! ## Module Overview
//!
//! - [`exposure`] - Weighted exposure aggregation and display rounding
//! - [`fields`] - Geography and sector field sets
//! - [`validation`] - Target portfolio write-time rules
//! - [`titles`] - Label index over security lists
//! - [`config`] - Aggregation configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod exposure;
pub mod fields;
pub mod titles;
pub mod validation;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

pub use config::{AggregationConfig, DEFAULT_DISPLAY_PRECISION};

pub use exposure::{
    aggregate_dimension, aggregate_exposure, round_for_display, DisplayRow, ExposureRow,
    ExposureTable, FieldExposure,
};

pub use fields::{ExposureDimension, GEOGRAPHY_FIELDS, SECTOR_FIELDS};

pub use titles::{TitleIndex, TitleOption};

pub use validation::{stored_weight, validate_target_portfolio, weight_summary, WeightSummary};

/// Prelude module for convenient imports.
///
/// ```rust
/// use lookthrough_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};

    pub use crate::config::AggregationConfig;

    pub use crate::exposure::{
        aggregate_dimension, aggregate_exposure, DisplayRow, ExposureRow, ExposureTable,
        FieldExposure,
    };

    pub use crate::fields::{ExposureDimension, GEOGRAPHY_FIELDS, SECTOR_FIELDS};

    pub use crate::titles::{TitleIndex, TitleOption};

    pub use crate::validation::{validate_target_portfolio, weight_summary, WeightSummary};

    // Re-export commonly used types from dependencies
    pub use lookthrough_core::{
        CollisionPolicy, Holding, SecurityId, SecurityRecord, SecurityTable, TargetPortfolio,
    };
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
