//! Lenient numeric coercion.
//!
//! Source spreadsheets mix `40`, `"40"`, `"40%"` and `"12,5"`. Coercion
//! accepts all of them and degrades anything else to `0.0` instead of
//! failing, so one bad cell never blocks a whole aggregation.

use serde_json::Value;

/// Coerces a raw attribute value to a number.
///
/// - absent or `null` gives `0.0`
/// - a JSON number is returned unchanged
/// - a string goes through [`coerce_str`]
/// - any other JSON shape gives `0.0`
///
/// # Examples
///
/// ```
/// use lookthrough_core::coerce_number;
/// use serde_json::json;
///
/// assert_eq!(coerce_number(None), 0.0);
/// assert_eq!(coerce_number(Some(&json!(null))), 0.0);
/// assert_eq!(coerce_number(Some(&json!(8.5))), 8.5);
/// assert_eq!(coerce_number(Some(&json!("12,5%"))), 12.5);
/// ```
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => coerce_str(s),
        Some(Value::Bool(_) | Value::Array(_) | Value::Object(_)) => 0.0,
    }
}

/// Coerces a numeric string.
///
/// Removes every `%`, replaces `,` with `.`, trims whitespace and parses the
/// longest leading decimal literal as `f64`, so trailing text such as
/// `"15.3 (est.)"` is ignored. Input without a leading number, or with a
/// non-finite one, gives `0.0`.
///
/// # Examples
///
/// ```
/// use lookthrough_core::coerce_str;
///
/// assert_eq!(coerce_str(" 7.25 "), 7.25);
/// assert_eq!(coerce_str("40 %"), 40.0);
/// assert_eq!(coerce_str("12 abc"), 12.0);
/// assert_eq!(coerce_str("abc"), 0.0);
/// ```
#[must_use]
pub fn coerce_str(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '%')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    leading_float(cleaned.trim())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses the longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn leading_float(s: &str) -> Option<f64> {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Serde adapter that reads a number leniently through [`coerce_number`].
///
/// Use on `f64` fields whose wire value may be a number, a decimal string
/// such as `"60.00"`, or `null`:
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Line {
///     #[serde(with = "lookthrough_core::coerce::lenient_number", default)]
///     ratio: f64,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"ratio": "60,00"}"#).unwrap();
/// assert_eq!(line.ratio, 60.0);
/// ```
pub mod lenient_number {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Deserializes any JSON value into an `f64`, degrading to `0.0`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(super::coerce_number(value.as_ref()))
    }

    /// Serializes the value as a plain JSON number.
    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_null() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
    }

    #[test]
    fn test_numbers_unchanged() {
        assert_eq!(coerce_number(Some(&json!(42))), 42.0);
        assert_eq!(coerce_number(Some(&json!(-3.75))), -3.75);
        assert_eq!(coerce_number(Some(&json!(0))), 0.0);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(coerce_str("12,5%"), 12.5);
        assert_eq!(coerce_str("7.25"), 7.25);
        assert_eq!(coerce_str("  40%  "), 40.0);
        assert_eq!(coerce_str("%%15"), 15.0);
        assert_eq!(coerce_str("-2,5"), -2.5);
        assert_eq!(coerce_str("1e2"), 100.0);
    }

    #[test]
    fn test_unparseable_strings() {
        assert_eq!(coerce_str("abc"), 0.0);
        assert_eq!(coerce_str(""), 0.0);
        assert_eq!(coerce_str("%"), 0.0);
        assert_eq!(coerce_str("."), 0.0);
        assert_eq!(coerce_str("-"), 0.0);
        assert_eq!(coerce_str("e5"), 0.0);
        assert_eq!(coerce_str("n/a 12"), 0.0);
    }

    #[test]
    fn test_leading_number_with_trailing_text() {
        assert_eq!(coerce_str("12 abc"), 12.0);
        assert_eq!(coerce_str("15.3 (est.)"), 15.3);
        // Thousands separator becomes a second dot; parsing stops there
        assert_eq!(coerce_str("1,234.5"), 1.234);
        assert_eq!(coerce_str("5.-"), 5.0);
        assert_eq!(coerce_str(".5x"), 0.5);
        assert_eq!(coerce_str("-,75"), -0.75);
        assert_eq!(coerce_str("2e"), 2.0);
        assert_eq!(coerce_str("3E-1 bps"), 0.3);
        assert_eq!(coerce_str("+8"), 8.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(coerce_str("NaN"), 0.0);
        assert_eq!(coerce_str("inf"), 0.0);
        assert_eq!(coerce_str("-infinity"), 0.0);
        assert_eq!(coerce_str("Infinity"), 0.0);
        assert_eq!(coerce_str("1e400"), 0.0);
    }

    #[test]
    fn test_other_shapes() {
        assert_eq!(coerce_number(Some(&json!(true))), 0.0);
        assert_eq!(coerce_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(coerce_number(Some(&json!({"v": 1}))), 0.0);
    }

    #[test]
    fn test_lenient_number_adapter() {
        #[derive(serde::Deserialize, serde::Serialize)]
        struct Line {
            #[serde(with = "lenient_number", default)]
            ratio: f64,
        }

        let parsed: Line = serde_json::from_str(r#"{"ratio": "60.00"}"#).unwrap();
        assert_eq!(parsed.ratio, 60.0);

        let parsed: Line = serde_json::from_str(r#"{"ratio": null}"#).unwrap();
        assert_eq!(parsed.ratio, 0.0);

        let parsed: Line = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.ratio, 0.0);

        let json = serde_json::to_string(&Line { ratio: 8.5 }).unwrap();
        assert_eq!(json, r#"{"ratio":8.5}"#);
    }
}
