//! Title index for picking securities by label.
//!
//! Each security gets one option label. Free text typed by a user is
//! resolved against those labels after normalization, so "msci world",
//! "MSCI-World" and "Msci Wörld" all find the same record.

use lookthrough_core::{normalize_label, SecurityId, SecurityRecord};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options returned by an empty search.
pub const DEFAULT_SUGGESTIONS: usize = 20;

/// Maximum options returned by a filtered search.
pub const MAX_MATCHES: usize = 50;

/// A selectable security.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleOption {
    /// Security identifier.
    pub id: SecurityId,

    /// Label shown to the user.
    pub label: String,
}

/// Label index over a security list.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    options: Vec<TitleOption>,
    by_key: HashMap<String, usize>,
}

impl TitleIndex {
    /// Builds the index. On label collisions the first record wins.
    #[must_use]
    pub fn new(records: &[SecurityRecord]) -> Self {
        let mut options: Vec<TitleOption> = Vec::with_capacity(records.len());
        let mut by_key: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for record in records {
            let label = record.option_label();
            let key = normalize_label(&label);
            if !key.is_empty() {
                if let Some(&kept) = by_key.get(&key) {
                    log::debug!(
                        "label '{}' of security {} shadowed by security {}",
                        label,
                        record.id,
                        options[kept].id
                    );
                } else {
                    by_key.insert(key, options.len());
                }
            }
            options.push(TitleOption {
                id: record.id.clone(),
                label,
            });
        }

        Self { options, by_key }
    }

    /// Resolves free text to a security by normalized label.
    #[must_use]
    pub fn find_by_text(&self, text: &str) -> Option<&TitleOption> {
        let key = normalize_label(text);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).map(|&i| &self.options[i])
    }

    /// Returns options whose label matches `filter`.
    ///
    /// An empty filter gives the first [`DEFAULT_SUGGESTIONS`] options. A
    /// filter is tried as a case-insensitive regex first; if it does not
    /// compile, plain case-insensitive substring matching is used.
    #[must_use]
    pub fn search(&self, filter: &str) -> Vec<&TitleOption> {
        let filter = filter.trim();
        if filter.is_empty() {
            return self.options.iter().take(DEFAULT_SUGGESTIONS).collect();
        }

        match RegexBuilder::new(filter).case_insensitive(true).build() {
            Ok(re) => self
                .options
                .iter()
                .filter(|o| re.is_match(&o.label))
                .take(MAX_MATCHES)
                .collect(),
            Err(e) => {
                log::debug!("filter '{filter}' is not a valid pattern ({e}), using substring match");
                let needle = filter.to_lowercase();
                self.options
                    .iter()
                    .filter(|o| o.label.to_lowercase().contains(&needle))
                    .take(MAX_MATCHES)
                    .collect()
            }
        }
    }

    /// Returns the label of a security.
    #[must_use]
    pub fn label_for(&self, id: &SecurityId) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.id == id)
            .map(|o| o.label.as_str())
    }

    /// All options, in record order.
    #[must_use]
    pub fn options(&self) -> &[TitleOption] {
        &self.options
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SecurityRecord> {
        vec![
            SecurityRecord::new(1, "CW8").with_attribute("Nom", "MSCI World"),
            SecurityRecord::new(2, "PAEEM").with_title("MSCI Emerging Markets"),
            SecurityRecord::new(3, "OBLI"),
            SecurityRecord::new(4, "").with_attribute("Code", "XYZ"),
            SecurityRecord::new(5, ""),
        ]
    }

    #[test]
    fn test_labels() {
        let index = TitleIndex::new(&records());
        let labels: Vec<&str> = index.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            ["MSCI World", "MSCI Emerging Markets", "OBLI", "XYZ", "#5"]
        );
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_find_by_text() {
        let index = TitleIndex::new(&records());
        assert_eq!(index.find_by_text("msci-world").map(|o| o.id.as_str()), Some("1"));
        assert_eq!(index.find_by_text("  MSCI  Wörld ").map(|o| o.id.as_str()), Some("1"));
        assert_eq!(index.find_by_text("obli").map(|o| o.id.as_str()), Some("3"));
        assert!(index.find_by_text("MSCI").is_none());
        assert!(index.find_by_text("   ").is_none());
        assert!(index.find_by_text("---").is_none());
    }

    #[test]
    fn test_first_wins_on_collision() {
        let index = TitleIndex::new(&[
            SecurityRecord::new(1, "A").with_title("Fonds Euro"),
            SecurityRecord::new(2, "B").with_title("FONDS-EURO"),
        ]);
        assert_eq!(index.find_by_text("fonds euro").map(|o| o.id.as_str()), Some("1"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_search() {
        let index = TitleIndex::new(&records());

        let hits: Vec<&str> = index.search("msci").iter().map(|o| o.id.as_str()).collect();
        assert_eq!(hits, ["1", "2"]);

        let hits: Vec<&str> = index.search("^msci w").iter().map(|o| o.id.as_str()).collect();
        assert_eq!(hits, ["1"]);

        assert_eq!(index.search("").len(), 5);
        assert!(index.search("nothing").is_empty());
    }

    #[test]
    fn test_search_invalid_regex_falls_back() {
        let index = TitleIndex::new(&[SecurityRecord::new(1, "A").with_title("Fonds (Euro")]);
        let hits = index.search("(euro");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_limits() {
        let records: Vec<SecurityRecord> = (0..80)
            .map(|i| SecurityRecord::new(i, format!("FUND{i}")))
            .collect();
        let index = TitleIndex::new(&records);
        assert_eq!(index.search("").len(), DEFAULT_SUGGESTIONS);
        assert_eq!(index.search("fund").len(), MAX_MATCHES);
    }

    #[test]
    fn test_label_for() {
        let index = TitleIndex::new(&records());
        assert_eq!(index.label_for(&SecurityId::from(2)), Some("MSCI Emerging Markets"));
        assert_eq!(index.label_for(&SecurityId::from(42)), None);
    }
}
