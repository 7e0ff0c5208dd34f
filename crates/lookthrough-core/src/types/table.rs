//! Security records indexed by id.

use super::{SecurityId, SecurityRecord};
use crate::error::CoreResult;
use std::collections::HashMap;

/// Lookup table of security records.
///
/// Built from the record list fetched from the API. If the list contains the
/// same id more than once, the later record replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityTable {
    records: HashMap<SecurityId, SecurityRecord>,
}

impl SecurityTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced.
    pub fn insert(&mut self, record: SecurityRecord) -> Option<SecurityRecord> {
        self.records.insert(record.id.clone(), record)
    }

    /// Returns the record with the given id.
    #[must_use]
    pub fn get(&self, id: &SecurityId) -> Option<&SecurityRecord> {
        self.records.get(id)
    }

    /// Returns true if a record with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &SecurityId) -> bool {
        self.records.contains_key(id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SecurityRecord> {
        self.records.values()
    }

    /// Decodes a security list payload into a table.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(SecurityRecord::list_from_json(json)?.into_iter().collect())
    }
}

impl FromIterator<SecurityRecord> for SecurityTable {
    fn from_iter<I: IntoIterator<Item = SecurityRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        for record in iter {
            if let Some(previous) = table.insert(record) {
                log::debug!("security {} listed twice, keeping the later record", previous.id);
            }
        }
        table
    }
}

impl From<Vec<SecurityRecord>> for SecurityTable {
    fn from(records: Vec<SecurityRecord>) -> Self {
        records.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_either_id_form() {
        let table: SecurityTable = vec![
            SecurityRecord::new(1, "A"),
            SecurityRecord::new("2", "B"),
        ]
        .into();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&SecurityId::from("1")).map(|r| r.code.as_str()), Some("A"));
        assert_eq!(table.get(&SecurityId::from(2)).map(|r| r.code.as_str()), Some("B"));
        assert!(!table.contains(&SecurityId::from(3)));
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let table: SecurityTable = vec![
            SecurityRecord::new(1, "OLD"),
            SecurityRecord::new(1, "NEW"),
        ]
        .into();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&SecurityId::from(1)).unwrap().code, "NEW");
    }

    #[test]
    fn test_from_json() {
        let table = SecurityTable::from_json(r#"[{"id": 5, "code": "E"}]"#).unwrap();
        assert!(table.contains(&SecurityId::from(5)));
        assert_eq!(table.iter().count(), 1);

        let empty = SecurityTable::from_json("null").unwrap();
        assert!(empty.is_empty());
    }
}
