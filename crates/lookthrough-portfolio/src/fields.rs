//! Exposure field sets.
//!
//! The geographic and sector columns reported by the analysis view. These
//! are fixed, ordered lists: aggregation reports fields in exactly this
//! order and never discovers new ones from the data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic exposure fields, in report order.
pub const GEOGRAPHY_FIELDS: &[&str] = &[
    "USA",
    "Japon",
    "Grande Bretagne",
    "Canada",
    "Pays Emergeants Hors Chine et Japon",
    "Australie",
    "Suede",
    "Suisse",
    "Chine",
    "Israel",
    "Allemagne",
    "Nouvelle Zelande",
    "Pays-Bas",
    "Irlande",
    "Espagne",
    "Italie",
    "France",
    "Autre Pays",
];

/// Sector exposure fields, in report order.
pub const SECTOR_FIELDS: &[&str] = &[
    "Etats",
    "Industrie",
    "Finance",
    "Consommation Cyclique",
    "Technologie",
    "Sante",
    "Consommation Defensive",
    "Communication",
    "Immobilier",
    "Matieres Premieres",
    "Energie",
    "Service Publiques",
    "Services de consommation",
    "Autre Secteur",
];

/// Dimension along which exposure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureDimension {
    /// Country exposure.
    #[default]
    Geography,

    /// Industry sector exposure.
    Sector,
}

impl ExposureDimension {
    /// All dimensions, in report order.
    pub const ALL: [Self; 2] = [Self::Geography, Self::Sector];

    /// Returns the configured fields for this dimension.
    #[must_use]
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Geography => GEOGRAPHY_FIELDS,
            Self::Sector => SECTOR_FIELDS,
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Geography => "Geography",
            Self::Sector => "Sector",
        }
    }

    /// Returns a short code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Geography => "geography",
            Self::Sector => "sector",
        }
    }
}

impl fmt::Display for ExposureDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExposureDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geography" | "geo" | "country" => Ok(Self::Geography),
            "sector" | "industry" => Ok(Self::Sector),
            other => Err(format!("Unknown dimension: {other}. Use geography or sector.")),
        }
    }
}
