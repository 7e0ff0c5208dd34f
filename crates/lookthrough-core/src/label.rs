//! Attribute label normalization.
//!
//! Column labels in security reference data are typed by hand in
//! spreadsheets, so the same field shows up as `"Qualité crédit"`,
//! `"Qualite Credit"` or `"QUALITE-CREDIT"`. [`normalize_label`] maps all of
//! them to one comparison key.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Produces the canonical comparison key for a label.
///
/// Steps, in order:
/// 1. canonical decomposition (NFD), so `é` becomes `e` + U+0301
/// 2. combining marks are dropped
/// 3. lowercase
/// 4. every run of characters outside `a-z0-9` becomes a single space
/// 5. leading and trailing spaces are trimmed
///
/// Total and deterministic; the empty string maps to the empty string.
///
/// # Examples
///
/// ```
/// use lookthrough_core::normalize_label;
///
/// assert_eq!(normalize_label("Qualité credit"), normalize_label("Qualite Crédit"));
/// assert_eq!(normalize_label("  Pays-Bas / NL "), "pays bas nl");
/// assert_eq!(normalize_label(""), "");
/// ```
#[must_use]
pub fn normalize_label(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut gap = false;

    for c in raw.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
                if gap && !key.is_empty() {
                    key.push(' ');
                }
                gap = false;
                key.push(lower);
            } else {
                gap = true;
            }
        }
    }

    key
}

/// A normalized label, usable as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LabelKey(String);

impl LabelKey {
    /// Normalizes `raw` into a key.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize_label(raw))
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the label had no alphanumeric content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `raw` normalizes to this key.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        normalize_label(raw) == self.0
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LabelKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<&String> for LabelKey {
    fn from(raw: &String) -> Self {
        Self::new(raw)
    }
}
