//! Field access shared by every record a list page can display.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value read from a record for searching and sorting.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Parsed instant plus the string the backend sent, which search matches.
    Timestamp { at: DateTime<Utc>, raw: String },
}

impl FieldValue {
    /// Position of the variant when two different kinds are compared.
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Timestamp { .. } => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Null => 4,
        }
    }

    /// Total order used by the list sort.
    ///
    /// Numbers compare numerically, text lexicographically and timestamps
    /// chronologically. Mixed kinds fall back to a fixed rank so the order
    /// stays total even on heterogeneous backend data.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Timestamp { at: a, .. }, FieldValue::Timestamp { at: b, .. }) => {
                a.cmp(b)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Lower-cased text the search filter matches against.
    ///
    /// Booleans and missing values are never searchable.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text.to_lowercase()),
            FieldValue::Number(number) => Some(number.to_string()),
            FieldValue::Timestamp { raw, .. } => Some(raw.to_lowercase()),
            FieldValue::Bool(_) | FieldValue::Null => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::from)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp {
            raw: value.to_rfc3339(),
            at: value,
        }
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::from)
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Value::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => FieldValue::Timestamp {
                    at: ts.with_timezone(&Utc),
                    raw: s.clone(),
                },
                Err(_) => FieldValue::Text(s.clone()),
            },
            // Nested collections are not addressable as a single column.
            Value::Array(_) | Value::Object(_) => FieldValue::Null,
        }
    }
}

/// A record that exposes named fields to the list controller.
pub trait ListRecord {
    /// Returns the value stored under `key`, or [`FieldValue::Null`].
    fn field(&self, key: &str) -> FieldValue;
}

impl<T: ListRecord + ?Sized> ListRecord for &T {
    fn field(&self, key: &str) -> FieldValue {
        (**self).field(key)
    }
}

/// Untyped backend record, addressable with dotted keys (`pms_site.name`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(Map<String, Value>);

impl JsonRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Resolves a dotted path through nested objects.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Overwrites a top-level field.
    pub fn set(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for JsonRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl ListRecord for JsonRecord {
    fn field(&self, key: &str) -> FieldValue {
        self.lookup(key).map_or(FieldValue::Null, FieldValue::from)
    }
}
