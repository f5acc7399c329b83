//! Defensive scalar extraction from untyped JSON.
//!
//! Gamma payloads mix numbers, numeric strings and free text under the same
//! keys. Every read goes through [`FieldValue::coerce`] so a malformed field
//! degrades to a default instead of failing the whole event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Display placeholder for fields the API did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// Result of reading one raw field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl FieldValue {
    /// Coerce a raw JSON value.
    ///
    /// Order: JSON number, boolean (as 1/0), string parsed as float, string
    /// parsed as integer, then the raw text. `null` is `Missing`; arrays and
    /// objects come back as their JSON text.
    pub fn coerce(raw: &Value) -> Self {
        match raw {
            Value::Null => FieldValue::Missing,
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            Value::Bool(b) => FieldValue::Number(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => parse_numeric(s)
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(s.clone())),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Read a list element without coercing strings, so outcome labels such
    /// as `"1.50"` keep their spelling.
    pub fn literal(raw: &Value) -> Self {
        match raw {
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::coerce(other),
        }
    }

    pub fn not_available() -> Self {
        FieldValue::Text(NOT_AVAILABLE.to_string())
    }

    pub fn or(self, default: FieldValue) -> Self {
        match self {
            FieldValue::Missing => default,
            value => value,
        }
    }

    /// `Missing` becomes the "N/A" display placeholder.
    pub fn or_not_available(self) -> Self {
        self.or(FieldValue::not_available())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => parse_numeric(s),
            FieldValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Truthiness: non-zero numbers and non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n != 0.0,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Missing => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Missing => f.write_str(NOT_AVAILABLE),
        }
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.parse::<i64>().ok().map(|i| i as f64))
}

/// Read `key` from a JSON object. Absent keys and `null` are `Missing`.
pub fn extract(container: &Map<String, Value>, key: &str) -> FieldValue {
    container
        .get(key)
        .map(FieldValue::coerce)
        .unwrap_or(FieldValue::Missing)
}

/// Like [`extract`], substituting `default` when the key is absent.
pub fn extract_or(container: &Map<String, Value>, key: &str, default: FieldValue) -> FieldValue {
    extract(container, key).or(default)
}

/// Permissive numeric read used for aggregation: anything unparseable is `default`.
pub fn safe_float(value: &FieldValue, default: f64) -> f64 {
    value.as_f64().unwrap_or(default)
}
