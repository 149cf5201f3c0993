//! Read-only introspection for dashboards and logs
//!
//! Stores expose a handful of named properties (sample count, latest value,
//! earliest timestamp, ...) that a dashboard or logging collaborator can poll.
//! Reading a property never mutates the store.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Trait for providing lightweight logging summaries of stored types
///
/// Large structures (whole trajectories, long histories) should only
/// report metadata so a log line stays short.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for usize {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

/// Value of a single telemetry property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    /// The property has no meaningful value right now (e.g. the store is empty)
    Missing,
}

impl PropertyValue {
    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PropertyValue::Missing)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropertyValue::Missing)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Missing => write!(f, "N/A"),
        }
    }
}

/// Named-property query surface
pub trait Telemetry {
    /// Every property this object publishes, in a stable order
    fn properties(&self) -> Vec<(&'static str, PropertyValue)>;

    /// Look up a single property by name
    fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Properties as a JSON object, for dashboards that speak JSON
    fn snapshot(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.properties() {
            let json = serde_json::to_value(&value).unwrap_or(Value::Null);
            map.insert(key.to_string(), json);
        }
        Value::Object(map)
    }
}
