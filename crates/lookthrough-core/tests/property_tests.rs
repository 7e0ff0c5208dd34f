//! Property-based tests for normalization and coercion.
//!
//! These tests verify properties that should hold for any input:
//! - Normalization is total, idempotent and insensitive to case and accents
//! - Normalized keys only contain `a-z`, `0-9` and single inner spaces
//! - Coercion never fails and never returns a non-finite value
//! - Lookup agrees with the pre-built index

use lookthrough_core::prelude::*;
use proptest::prelude::*;
use serde_json::Value;

// =============================================================================
// GENERATORS
// =============================================================================

const ACCENTED: &[(&str, &str)] = &[
    ("e", "é"),
    ("e", "è"),
    ("e", "ê"),
    ("a", "à"),
    ("a", "â"),
    ("i", "ï"),
    ("o", "ô"),
    ("u", "ù"),
    ("c", "ç"),
];

fn accent(word: &str, choices: &[bool]) -> String {
    let mut out = String::new();
    for (i, ch) in word.chars().enumerate() {
        let s = ch.to_string();
        let replaced = ACCENTED
            .iter()
            .find(|(plain, _)| *plain == s)
            .filter(|_| choices.get(i).copied().unwrap_or(false))
            .map(|(_, accented)| (*accented).to_string());
        out.push_str(&replaced.unwrap_or(s));
    }
    out
}

// =============================================================================
// NORMALIZATION
// =============================================================================

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in "\\PC{0,40}") {
        let once = normalize_label(&raw);
        prop_assert_eq!(normalize_label(&once), once);
    }

    #[test]
    fn prop_normalized_charset(raw in "\\PC{0,40}") {
        let key = normalize_label(&raw);
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        prop_assert!(!key.starts_with(' '));
        prop_assert!(!key.ends_with(' '));
        prop_assert!(!key.contains("  "));
    }

    #[test]
    fn prop_case_and_accent_insensitive(
        word in "[a-z]{1,12}( [a-z]{1,12}){0,2}",
        choices in proptest::collection::vec(any::<bool>(), 40),
        upper in any::<bool>(),
    ) {
        let mut variant = accent(&word, &choices);
        if upper {
            variant = variant.to_uppercase();
        }
        prop_assert_eq!(normalize_label(&variant), normalize_label(&word));
    }

    #[test]
    fn prop_punctuation_insensitive(
        parts in proptest::collection::vec("[a-z0-9]{1,8}", 1..4),
        sep in "[ \\-_./()%]{1,3}",
    ) {
        let spaced = parts.join(" ");
        let punctuated = format!("{sep}{}{sep}", parts.join(sep.as_str()));
        prop_assert_eq!(normalize_label(&punctuated), normalize_label(&spaced));
    }
}

// =============================================================================
// COERCION
// =============================================================================

proptest! {
    #[test]
    fn prop_coerce_never_non_finite(raw in "\\PC{0,24}") {
        prop_assert!(coerce_str(&raw).is_finite());
    }

    #[test]
    fn prop_comma_decimal_and_percent(int in 0u32..10_000, frac in 0u32..100) {
        let dotted = format!("{int}.{frac:02}");
        let expected: f64 = dotted.parse().unwrap();
        let comma = format!("{int},{frac:02}%");
        prop_assert_eq!(coerce_str(&comma), expected);
        prop_assert_eq!(coerce_number(Some(&Value::String(comma))), expected);
    }

    #[test]
    fn prop_trailing_text_ignored(int in 0u32..10_000, frac in 0u32..100, tail in "[a-zA-Z()/ ]{0,12}") {
        let dotted = format!("{int}.{frac:02}");
        let expected: f64 = dotted.parse().unwrap();
        prop_assert_eq!(coerce_str(&format!("{dotted} {tail}")), expected);
    }

    #[test]
    fn prop_numbers_pass_through(v in -1.0e9f64..1.0e9) {
        let value = serde_json::json!(v);
        prop_assert_eq!(coerce_number(Some(&value)), v);
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

proptest! {
    #[test]
    fn prop_index_agrees_with_lookup(
        labels in proptest::collection::vec("[A-Za-z \\-]{0,10}", 0..8),
        values in proptest::collection::vec(0u32..100, 8),
        probe in "[A-Za-z \\-]{0,10}",
    ) {
        let attrs: Attributes = labels
            .iter()
            .zip(values.iter())
            .map(|(l, v)| (l.clone(), Value::from(*v)))
            .collect();
        let index = NormalizedAttributes::new(&attrs, CollisionPolicy::FirstWins);

        prop_assert_eq!(index.number(&probe), field_lookup(&attrs, &probe));
        for label in &labels {
            prop_assert_eq!(index.number(label), field_lookup(&attrs, label));
        }
    }
}
