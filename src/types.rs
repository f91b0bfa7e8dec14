use std::collections::HashMap;

use serde::{ser::SerializeMap, Deserialize, Serialize};

/// The quote character the unit tables wrap identifiers and lists in.
const QUOTE: char = '"';

/// A type alias for a unit identifier, like `hpea` or `ogru`.
/// Identifiers are always stored with their quotes removed.
pub type UnitId = String;

/// A string field that may be missing from a record.
/// Serializes to either the string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NullString(Option<String>);

impl NullString {
    /// Create an absent value
    pub fn null() -> Self {
        NullString(None)
    }

    /// Whether the value is present
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Get the value, if it is present
    pub fn as_option(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Get the value, or an empty string if it is absent
    pub fn as_str(&self) -> &str {
        self.as_option().unwrap_or_default()
    }
}

impl From<Option<String>> for NullString {
    fn from(value: Option<String>) -> Self {
        NullString(value)
    }
}

impl From<String> for NullString {
    fn from(value: String) -> Self {
        NullString(Some(value))
    }
}

impl From<&str> for NullString {
    fn from(value: &str) -> Self {
        NullString(Some(value.to_owned()))
    }
}

/// Removes every quote character from an identifier.
pub fn strip_quotes(input: &str) -> UnitId {
    input.replace(QUOTE, "")
}

/// Trims quote characters from both ends of a field.
pub fn trim_quotes(input: &str) -> &str {
    input.trim_matches(QUOTE)
}

/// Splits a comma separated list field, like `"hhou,halt,hbar"`, into its entries.
/// The quotes around the whole field are trimmed and empty entries are
/// skipped. Entries are otherwise kept as they are, whitespace included.
pub fn split_list(input: &str) -> impl Iterator<Item = &str> {
    trim_quotes(input)
        .split(',')
        .filter(|entry| !entry.is_empty())
}

/// A map from unit identifiers to values that remembers insertion order.
///
/// The unit tables are small, but the output has to be reproducible, so we
/// can't iterate a plain [HashMap].
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<(UnitId, T)>,
    index: HashMap<UnitId, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. If the key is already present the value is replaced in
    /// place, keeping the original position, and the old value is returned.
    pub fn insert<K: Into<UnitId>>(&mut self, key: K, value: T) -> Option<T> {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.index.get(key).map(|&i| &mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &T)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &UnitId> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<T: Serialize> Serialize for Table<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
