//! Target portfolio and its holdings.

use super::SecurityId;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// One line of a target portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Line identifier assigned by the API, if persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Referenced security (wire name `signaletique`).
    #[serde(rename = "signaletique")]
    pub security: SecurityId,

    /// Weight in percent of the portfolio (wire name `ratio`).
    ///
    /// The API sends decimal strings such as `"60.00"`; they are coerced
    /// leniently, so a malformed ratio reads as `0.0`.
    #[serde(
        rename = "ratio",
        with = "crate::coerce::lenient_number",
        default
    )]
    pub weight: f64,
}

impl Holding {
    /// Creates a holding.
    #[must_use]
    pub fn new(security: impl Into<SecurityId>, weight: f64) -> Self {
        Self {
            id: None,
            security: security.into(),
            weight,
        }
    }

    /// Sets the line identifier.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A user-defined model allocation (security -> weight %).
///
/// Holdings keep their API order. They are not required to sum to 100 when
/// read; see the portfolio crate's validation for write-time rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPortfolio {
    /// Identifier assigned by the API, if persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Portfolio name.
    #[serde(default)]
    pub name: String,

    /// Holdings in order (wire name `items`).
    #[serde(rename = "items", default)]
    pub holdings: Vec<Holding>,
}

impl TargetPortfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            holdings: Vec::new(),
        }
    }

    /// Appends a holding.
    #[must_use]
    pub fn with_holding(mut self, security: impl Into<SecurityId>, weight: f64) -> Self {
        self.holdings.push(Holding::new(security, weight));
        self
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the portfolio has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of holding weights, in percent.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }

    /// Decodes a target portfolio payload.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::invalid_json("target portfolio", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "id": 4,
            "name": "Balanced",
            "date_creation": "2025-01-10T09:00:00Z",
            "items": [
                {"id": 11, "signaletique": 1, "ratio": "60.00"},
                {"id": 12, "signaletique": 2, "ratio": 40}
            ]
        }"#;
        let portfolio = TargetPortfolio::from_json(json).unwrap();

        assert_eq!(portfolio.name, "Balanced");
        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.holdings[0].security, SecurityId::from(1));
        assert_eq!(portfolio.holdings[0].weight, 60.0);
        assert_eq!(portfolio.holdings[0].id, Some(11));
        assert_eq!(portfolio.holdings[1].weight, 40.0);
        assert_eq!(portfolio.total_weight(), 100.0);
    }

    #[test]
    fn test_missing_items() {
        let portfolio = TargetPortfolio::from_json(r#"{"name": "Empty"}"#).unwrap();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_weight(), 0.0);
    }

    #[test]
    fn test_malformed_ratio_reads_zero() {
        let json = r#"{"name": "P", "items": [{"signaletique": 1, "ratio": "abc"}]}"#;
        let portfolio = TargetPortfolio::from_json(json).unwrap();
        assert_eq!(portfolio.holdings[0].weight, 0.0);
    }

    #[test]
    fn test_invalid_payload() {
        let err = TargetPortfolio::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("target portfolio"));
    }

    #[test]
    fn test_builder_round_trip() {
        let portfolio = TargetPortfolio::new("Model")
            .with_holding(1, 55.5)
            .with_holding("2", 44.5);
        let json = serde_json::to_string(&portfolio).unwrap();
        assert!(json.contains("\"signaletique\":1"));
        assert!(json.contains("\"ratio\":55.5"));
        assert_eq!(TargetPortfolio::from_json(&json).unwrap(), portfolio);
    }
}
