//! Security reference record ("signaletique").

use super::SecurityId;
use crate::error::{CoreError, CoreResult};
use crate::lookup::{field_lookup, field_text, Attributes};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Attribute label holding a security's display name.
pub const NAME_LABEL: &str = "Nom";

/// Attribute label holding a security's code when the record has none.
pub const CODE_LABEL: &str = "Code";

/// Reference data for one security.
///
/// `attributes` (wire name `donnees_supplementaires`) keeps whatever columns
/// the source spreadsheet had, including geographic and sector composition
/// percentages. Labels are free-form; use [`SecurityRecord::field`] rather
/// than indexing the map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// Record identifier.
    pub id: SecurityId,

    /// Short ticker or internal code.
    #[serde(default)]
    pub code: String,

    /// Title of the security.
    #[serde(rename = "titre", default)]
    pub title: Option<String>,

    /// ISIN, when known.
    #[serde(default)]
    pub isin: Option<String>,

    /// Asset category.
    #[serde(rename = "categorie", default)]
    pub category: Option<String>,

    /// Free-form attributes in source order.
    #[serde(
        rename = "donnees_supplementaires",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub attributes: Attributes,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Attributes>::deserialize(deserializer)?.unwrap_or_default())
}

impl SecurityRecord {
    /// Creates a record with no title and no attributes.
    #[must_use]
    pub fn new(id: impl Into<SecurityId>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: None,
            isin: None,
            category: None,
            attributes: Attributes::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Appends an attribute (replaces the value if the exact label exists).
    #[must_use]
    pub fn with_attribute(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(label.into(), value.into());
        self
    }

    /// Returns the coerced numeric value of an attribute, matched by
    /// normalized label. Missing or malformed values give `0.0`.
    #[must_use]
    pub fn field(&self, label: &str) -> f64 {
        field_lookup(&self.attributes, label)
    }

    /// Returns the text of an attribute, matched by normalized label.
    #[must_use]
    pub fn field_text(&self, label: &str) -> Option<String> {
        field_text(&self.attributes, label)
    }

    /// Returns the title if it is present and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Name shown for the security in exposure reports.
    ///
    /// The `Nom` attribute, else the title, else `#<id>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.field_text(NAME_LABEL)
            .or_else(|| self.title().map(str::to_string))
            .unwrap_or_else(|| self.id.fallback_label())
    }

    /// Label shown when picking the security from a list.
    ///
    /// Like [`display_name`](Self::display_name), but falls back to the code
    /// (record code, then `Code` attribute) before `#<id>`.
    #[must_use]
    pub fn option_label(&self) -> String {
        self.field_text(NAME_LABEL)
            .or_else(|| self.title().map(str::to_string))
            .or_else(|| Some(self.code.clone()).filter(|c| !c.is_empty()))
            .or_else(|| {
                self.attributes
                    .get(CODE_LABEL)
                    .and_then(crate::lookup::value_text)
            })
            .unwrap_or_else(|| self.id.fallback_label())
    }

    /// Decodes a security list payload.
    ///
    /// A payload that is not a JSON array yields an empty list; individual
    /// records that fail to decode are an error.
    pub fn list_from_json(json: &str) -> CoreResult<Vec<Self>> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CoreError::invalid_json("security list", e))?;

        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map_err(|e| CoreError::invalid_json("security list", e)),
            other => {
                log::warn!(
                    "security list payload is not an array ({}), treating as empty",
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": 3,
            "code": "CW8",
            "titre": "Amundi MSCI World",
            "isin": "LU1681043599",
            "categorie": "ETF",
            "description": null,
            "donnees_supplementaires": {"Nom": "MSCI World", "USA": "68,2%", "Japon": 6}
        }"#;
        let record: SecurityRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, SecurityId::from(3));
        assert_eq!(record.title(), Some("Amundi MSCI World"));
        assert_eq!(record.category.as_deref(), Some("ETF"));
        assert_eq!(record.field("usa"), 68.2);
        assert_eq!(record.field("JAPON"), 6.0);
        assert_eq!(record.display_name(), "MSCI World");
    }

    #[test]
    fn test_attribute_order_preserved() {
        let json = r#"{"id": 1, "donnees_supplementaires": {"b": 1, "a": 2, "c": 3}}"#;
        let record: SecurityRecord = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = record.attributes.keys().map(String::as_str).collect();
        assert_eq!(labels, ["b", "a", "c"]);
    }

    #[test]
    fn test_null_attributes() {
        let json = r#"{"id": 1, "code": "X", "titre": "T", "donnees_supplementaires": null}"#;
        let record: SecurityRecord = serde_json::from_str(json).unwrap();
        assert!(record.attributes.is_empty());
        assert_eq!(record.field("USA"), 0.0);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let named = SecurityRecord::new(1, "A").with_attribute("nom", json!("Alpha"));
        assert_eq!(named.display_name(), "Alpha");

        let titled = SecurityRecord::new(2, "B").with_title("Beta Fund");
        assert_eq!(titled.display_name(), "Beta Fund");

        let empty_name = SecurityRecord::new(3, "C")
            .with_attribute("Nom", json!(""))
            .with_title("");
        assert_eq!(empty_name.display_name(), "#3");
    }

    #[test]
    fn test_option_label_fallbacks() {
        let coded = SecurityRecord::new(4, "DDD");
        assert_eq!(coded.option_label(), "DDD");

        let attr_code = SecurityRecord::new(5, "").with_attribute("Code", json!("EEE"));
        assert_eq!(attr_code.option_label(), "EEE");

        let bare = SecurityRecord::new(6, "");
        assert_eq!(bare.option_label(), "#6");
    }

    #[test]
    fn test_list_from_json() {
        let list = SecurityRecord::list_from_json(r#"[{"id": 1}, {"id": "2", "code": "B"}]"#)
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].code, "B");

        let not_a_list = SecurityRecord::list_from_json(r#"{"detail": "oops"}"#).unwrap();
        assert!(not_a_list.is_empty());

        assert!(SecurityRecord::list_from_json("[{").is_err());
        assert!(SecurityRecord::list_from_json(r#"[{"code": "no id"}]"#).is_err());
    }
}
