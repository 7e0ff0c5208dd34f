//! Label-insensitive attribute lookup.
//!
//! A security's attributes are a free-form `label -> value` map. Lookups
//! compare labels by their normalized key (see [`crate::label`]) and coerce
//! the matched value (see [`crate::coerce`]).

use crate::coerce::coerce_number;
use crate::label::normalize_label;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Attribute map of a security record, in insertion order.
pub type Attributes = Map<String, Value>;

/// Which entry wins when two stored labels normalize to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The first label in insertion order wins.
    #[default]
    FirstWins,

    /// The last label in insertion order wins.
    LastWins,
}

impl CollisionPolicy {
    /// Returns a short code for the policy.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::FirstWins => "first",
            Self::LastWins => "last",
        }
    }

    /// Parses a policy code (`first` / `last`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "first" | "first_wins" | "first-wins" => Some(Self::FirstWins),
            "last" | "last_wins" | "last-wins" => Some(Self::LastWins),
            _ => None,
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Finds the first entry whose label normalizes like `label`.
#[must_use]
pub fn find_entry<'a>(attributes: &'a Attributes, label: &str) -> Option<(&'a str, &'a Value)> {
    let wanted = normalize_label(label);
    attributes
        .iter()
        .find(|(key, _)| normalize_label(key) == wanted)
        .map(|(key, value)| (key.as_str(), value))
}

/// Returns the coerced value of the attribute matching `label`, or `0.0`.
///
/// # Examples
///
/// ```
/// use lookthrough_core::{field_lookup, Attributes};
/// use serde_json::json;
///
/// let mut attrs = Attributes::new();
/// attrs.insert("USA".into(), json!("40"));
///
/// assert_eq!(field_lookup(&attrs, "usa"), 40.0);
/// assert_eq!(field_lookup(&Attributes::new(), "USA"), 0.0);
/// ```
#[must_use]
pub fn field_lookup(attributes: &Attributes, label: &str) -> f64 {
    coerce_number(find_entry(attributes, label).map(|(_, value)| value))
}

/// Returns the display text of the attribute matching `label`.
///
/// Non-empty strings are returned as-is and numbers are formatted; empty
/// strings, `null` and other shapes give `None`.
#[must_use]
pub fn field_text(attributes: &Attributes, label: &str) -> Option<String> {
    find_entry(attributes, label).and_then(|(_, value)| value_text(value))
}

/// Converts a raw value into display text, if it has any.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One record's attributes indexed by normalized label.
///
/// Building the index normalizes every stored label once, so looking up
/// many fields on the same record stays linear in the number of labels.
#[derive(Debug, Clone)]
pub struct NormalizedAttributes<'a> {
    index: HashMap<String, (&'a str, &'a Value)>,
}

impl<'a> NormalizedAttributes<'a> {
    /// Indexes `attributes`, resolving label collisions with `policy`.
    #[must_use]
    pub fn new(attributes: &'a Attributes, policy: CollisionPolicy) -> Self {
        let mut index: HashMap<String, (&'a str, &'a Value)> =
            HashMap::with_capacity(attributes.len());

        for (label, value) in attributes {
            let key = normalize_label(label);
            let existing = index.get(&key).map(|(kept, _)| *kept);
            match existing {
                Some(kept) => {
                    log::trace!("attribute labels '{kept}' and '{label}' collide on key '{key}'");
                    if policy == CollisionPolicy::LastWins {
                        index.insert(key, (label.as_str(), value));
                    }
                }
                None => {
                    index.insert(key, (label.as_str(), value));
                }
            }
        }

        Self { index }
    }

    /// Returns the stored label and raw value matching `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<(&'a str, &'a Value)> {
        self.index.get(&normalize_label(label)).copied()
    }

    /// Returns the coerced value matching `label`, or `0.0`.
    #[must_use]
    pub fn number(&self, label: &str) -> f64 {
        coerce_number(self.get(label).map(|(_, value)| value))
    }

    /// Returns the display text matching `label`.
    #[must_use]
    pub fn text(&self, label: &str) -> Option<String> {
        self.get(label).and_then(|(_, value)| value_text(value))
    }

    /// Returns the number of distinct normalized labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
