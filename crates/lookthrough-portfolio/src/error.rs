//! Error types for portfolio operations.
//!
//! Aggregation never fails; these errors come from write-time validation
//! and from decoding inputs.

use lookthrough_core::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Portfolio has no holdings.
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    /// A holding weight is zero, negative or not a number.
    #[error("Invalid weight for security '{security}': {value}")]
    InvalidWeight {
        /// The referenced security.
        security: String,
        /// The rejected weight.
        value: f64,
    },

    /// The same security appears on more than one line.
    #[error("Security '{security}' appears more than once")]
    DuplicateSecurity {
        /// The repeated security.
        security: String,
    },

    /// Weights do not add up to the expected total.
    #[error("Weights sum to {total}%, expected {expected}%")]
    WeightTotal {
        /// Actual total.
        total: Decimal,
        /// Expected total.
        expected: Decimal,
    },

    /// Input decoding failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PortfolioError {
    /// Create an invalid weight error.
    #[must_use]
    pub fn invalid_weight(security: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            security: security.into(),
            value,
        }
    }

    /// Create a duplicate security error.
    #[must_use]
    pub fn duplicate_security(security: impl Into<String>) -> Self {
        Self::DuplicateSecurity {
            security: security.into(),
        }
    }
}
