//! Records and their key/value fields

use super::level::Severity;
use super::value::Value;
use std::panic::Location;

/// Ordered key/value pairs of a record
///
/// This is a flat attribute list, not a map: keys may repeat and insertion
/// order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValues {
    pairs: Vec<(String, Value)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Build from an alternating key, value, key, value... sequence.
    ///
    /// Keys are rendered with their display form. A trailing key with no
    /// value is paired with [`Value::Missing`].
    ///
    /// ```
    /// use logz::{KeyValues, Value};
    ///
    /// let kvs = KeyValues::from_flat(vec!["user".into(), "ada".into(), "dangling".into()]);
    /// assert_eq!(kvs.get("dangling"), Some(&Value::Missing));
    /// ```
    pub fn from_flat(items: Vec<Value>) -> Self {
        let mut kvs = Self::with_capacity(items.len().div_ceil(2));
        let mut iter = items.into_iter();
        while let Some(key) = iter.next() {
            let key = match key {
                Value::String(s) => s,
                other => other.to_string(),
            };
            kvs.push(key, iter.next().unwrap_or(Value::Missing));
        }
        kvs
    }

    /// Append a field (builder style)
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.push(key, value);
        self
    }

    /// Append a field
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append all fields of `other` after the existing ones
    pub fn extend(&mut self, other: KeyValues) {
        self.pairs.extend(other.pairs);
    }

    /// Last value recorded under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<()> for KeyValues {
    fn from(_: ()) -> Self {
        KeyValues::new()
    }
}

impl From<Vec<Value>> for KeyValues {
    fn from(items: Vec<Value>) -> Self {
        KeyValues::from_flat(items)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KeyValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kvs = KeyValues::new();
        for (k, v) in iter {
            kvs.push(k, v);
        }
        kvs
    }
}

impl IntoIterator for KeyValues {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// A single log record on its way to a sink
#[derive(Debug, Clone)]
pub struct Record {
    pub severity: Severity,
    pub fields: KeyValues,
    /// Call site of the public logging method
    pub location: &'static Location<'static>,
}

impl Record {
    #[track_caller]
    pub fn new(severity: Severity, fields: KeyValues) -> Self {
        Self {
            severity,
            fields,
            location: Location::caller(),
        }
    }

    pub fn at(
        severity: Severity,
        fields: KeyValues,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            severity,
            fields,
            location,
        }
    }
}
