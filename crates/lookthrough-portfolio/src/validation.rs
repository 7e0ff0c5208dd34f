//! Write-time validation of target portfolios.
//!
//! Aggregation accepts any portfolio. Before a portfolio is saved, however,
//! its lines must satisfy these rules:
//!
//! - at least one holding
//! - every weight strictly positive
//! - every security referenced at most once
//! - weights sum to 100% within 0.01
//!
//! Weights are stored with two decimals, so the total is computed in
//! `Decimal` after rounding each weight to two places.

use crate::error::{PortfolioError, PortfolioResult};
use lookthrough_core::TargetPortfolio;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Expected sum of weights, in percent.
pub const TARGET_TOTAL: Decimal = dec!(100);

/// Allowed deviation of the weight total from [`TARGET_TOTAL`].
pub const TOTAL_TOLERANCE: Decimal = dec!(0.01);

/// Decimals kept for stored weights.
pub const WEIGHT_SCALE: u32 = 2;

/// Running total of a portfolio's weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightSummary {
    /// Sum of weights at storage precision.
    pub total: Decimal,

    /// True when the total is within tolerance of 100%.
    pub balanced: bool,
}

/// Converts a weight to its stored decimal form.
#[must_use]
pub fn stored_weight(weight: f64) -> Option<Decimal> {
    if !weight.is_finite() {
        return None;
    }
    Decimal::from_f64(weight).map(|d| {
        let mut stored =
            d.round_dp_with_strategy(WEIGHT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        stored.rescale(WEIGHT_SCALE);
        stored
    })
}

/// Sums weights at storage precision and checks the total.
///
/// Non-finite weights count as zero, matching how an unfilled line
/// contributes nothing to the running total.
#[must_use]
pub fn weight_summary(portfolio: &TargetPortfolio) -> WeightSummary {
    let total: Decimal = portfolio
        .holdings
        .iter()
        .filter_map(|h| stored_weight(h.weight))
        .sum();

    WeightSummary {
        total,
        balanced: (total - TARGET_TOTAL).abs() <= TOTAL_TOLERANCE,
    }
}

/// Validates a target portfolio before it is saved.
///
/// # Errors
///
/// Returns the first rule violation found, checking in order: empty
/// portfolio, weight total, duplicate securities, non-positive weights.
pub fn validate_target_portfolio(portfolio: &TargetPortfolio) -> PortfolioResult<()> {
    if portfolio.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let summary = weight_summary(portfolio);
    if !summary.balanced {
        return Err(PortfolioError::WeightTotal {
            total: summary.total,
            expected: TARGET_TOTAL,
        });
    }

    let mut seen = HashSet::with_capacity(portfolio.len());
    for holding in &portfolio.holdings {
        if !seen.insert(&holding.security) {
            return Err(PortfolioError::duplicate_security(holding.security.as_str()));
        }
    }

    for holding in &portfolio.holdings {
        let positive = stored_weight(holding.weight).is_some_and(|w| w > Decimal::ZERO);
        if !positive {
            return Err(PortfolioError::invalid_weight(
                holding.security.as_str(),
                holding.weight,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_portfolio() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 60.0)
            .with_holding(2, 40.0);
        assert!(validate_target_portfolio(&portfolio).is_ok());
    }

    #[test]
    fn test_empty_portfolio() {
        let err = validate_target_portfolio(&TargetPortfolio::new("P")).unwrap_err();
        assert_eq!(err, PortfolioError::EmptyPortfolio);
    }

    #[test]
    fn test_total_within_tolerance() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 33.33)
            .with_holding(2, 33.33)
            .with_holding(3, 33.33);
        // 99.99 is within 0.01 of 100
        assert!(validate_target_portfolio(&portfolio).is_ok());
        assert_eq!(weight_summary(&portfolio).total, dec!(99.99));
    }

    #[test]
    fn test_total_out_of_tolerance() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 60.0)
            .with_holding(2, 39.98);
        let err = validate_target_portfolio(&portfolio).unwrap_err();
        assert_eq!(
            err,
            PortfolioError::WeightTotal {
                total: dec!(99.98),
                expected: dec!(100),
            }
        );
    }

    #[test]
    fn test_duplicate_security() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 50.0)
            .with_holding("1", 50.0);
        let err = validate_target_portfolio(&portfolio).unwrap_err();
        assert_eq!(err, PortfolioError::duplicate_security("1"));
    }

    #[test]
    fn test_non_positive_weight() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 100.0)
            .with_holding(2, 0.0);
        let err = validate_target_portfolio(&portfolio).unwrap_err();
        assert_eq!(err, PortfolioError::invalid_weight("2", 0.0));

        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 110.0)
            .with_holding(2, -10.0);
        assert!(matches!(
            validate_target_portfolio(&portfolio),
            Err(PortfolioError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_weight_summary() {
        let portfolio = TargetPortfolio::new("P")
            .with_holding(1, 12.346)
            .with_holding(2, f64::NAN);
        let summary = weight_summary(&portfolio);
        assert_eq!(summary.total, dec!(12.35));
        assert!(!summary.balanced);

        let balanced = TargetPortfolio::new("P").with_holding(1, 100.004);
        assert!(weight_summary(&balanced).balanced);
    }

    #[test]
    fn test_stored_weight() {
        assert_eq!(stored_weight(8.5).map(|d| d.to_string()), Some("8.50".to_string()));
        assert_eq!(stored_weight(f64::INFINITY), None);
    }
}
