//! Configuration for exposure aggregation.

use lookthrough_core::CollisionPolicy;
use serde::{Deserialize, Serialize};

/// Default number of decimals used when displaying exposures.
pub const DEFAULT_DISPLAY_PRECISION: u32 = 2;

/// Configuration for exposure aggregation.
///
/// Controls how attribute label collisions are resolved and how many
/// decimals are kept when values are rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Which attribute wins when two labels normalize to the same key.
    pub collision_policy: CollisionPolicy,

    /// Decimals kept by display rounding. Stored values are never rounded.
    pub display_precision: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::FirstWins,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl AggregationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collision policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Sets the display precision.
    #[must_use]
    pub fn with_display_precision(mut self, precision: u32) -> Self {
        self.display_precision = precision;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AggregationConfig::default();
        assert_eq!(config.collision_policy, CollisionPolicy::FirstWins);
        assert_eq!(config.display_precision, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AggregationConfig::new()
            .with_collision_policy(CollisionPolicy::LastWins)
            .with_display_precision(4);

        assert_eq!(config.collision_policy, CollisionPolicy::LastWins);
        assert_eq!(config.display_precision, 4);
    }

    #[test]
    fn test_serde() {
        let config = AggregationConfig::new().with_display_precision(3);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AggregationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: AggregationConfig =
            serde_json::from_str(r#"{"collision_policy": "last_wins"}"#).unwrap();
        assert_eq!(partial.collision_policy, CollisionPolicy::LastWins);
        assert_eq!(partial.display_precision, DEFAULT_DISPLAY_PRECISION);
    }
}
