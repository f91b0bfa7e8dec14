use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize,
};

use super::super::types::{NullString, Table};

/// A single row of one of the unit tables.
///
/// The fields are kept in the order they appear in the source file. Lookup
/// ignores ASCII case, since the function text files don't agree on whether a
/// key is called `Builds` or `builds`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, NullString)>,
}

impl Record {
    fn position(&self, key: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))
    }

    /// Get a field by its name
    pub fn get(&self, key: &str) -> Option<&NullString> {
        self.position(key).map(|i| &self.fields[i].1)
    }

    /// Get a field as a string, empty if the field is missing or null
    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).map_or("", NullString::as_str)
    }

    /// Set a field. An existing field with the same name is overwritten in place.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: NullString) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.fields[i].1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Copy every field of the other record into this one
    pub fn merge(&mut self, other: Record) {
        for (key, value) in other.fields {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, NullString)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, NullString)>>(iter: I) -> Self {
        let mut record = Record::default();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to nullable strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
        let mut record = Record::default();
        while let Some((key, value)) = map.next_entry::<String, NullString>()? {
            record.insert(key, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

impl Table<Record> {
    /// Insert a record, merging it into an existing record with the same key
    pub fn insert_merged<K: Into<String>>(&mut self, key: K, record: Record) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => existing.merge(record),
            None => {
                self.insert(key, record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let mut record = Record::default();
        record.insert("Builds", NullString::from("hhou"));
        assert_eq!(record.get_str("builds"), "hhou");
        record.insert("BUILDS", NullString::from("halt"));
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.get_str("Builds"), "halt");
        assert_eq!(record.get_str("Upgrade"), "");
        assert!(record.get("Upgrade").is_none());
    }

    #[test]
    fn test_serialize_order() {
        let record: Record = [
            ("unitID", NullString::from("hpea")),
            ("type", NullString::from("peon")),
            ("armor", NullString::null()),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, "{\"unitID\":\"hpea\",\"type\":\"peon\",\"armor\":null}");
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_insert_merged() {
        let mut table = Table::new();
        table.insert_merged(
            "hpea",
            [("Name", NullString::from("Peasant"))].into_iter().collect(),
        );
        table.insert_merged(
            "hpea",
            [("Art", NullString::from("BTNPeasant.blp"))]
                .into_iter()
                .collect(),
        );
        assert_eq!(table.len(), 1);
        let record = table.get("hpea").unwrap();
        assert_eq!(record.get_str("Name"), "Peasant");
        assert_eq!(record.get_str("Art"), "BTNPeasant.blp");
    }
}
