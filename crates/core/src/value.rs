//! Cell values observed through the query interface.
//!
//! A [`Value`] is one cell of one row, as reported by whatever client
//! executed the statement. The model is deliberately small: only what a
//! single SQL column can carry.
//!
//! Accessors come in two flavors:
//!
//! - **Strict** (`as_str`, `is_null`, ...): no coercion between types.
//! - **Lenient** (`as_int`, `to_text`): clients speaking the MySQL text
//!   protocol report numeric columns as text, so count and status reads
//!   must tolerate `Text("2")` where a `2` is meant.

use serde::{Deserialize, Serialize};

/// One cell of a query result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes that did not decode as UTF-8
    Bytes(Vec<u8>),
}

impl Value {
    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
        }
    }

    /// Check if this is a SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text content. Strict: `None` for every non-`Text` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret this value as an integer.
    ///
    /// Lenient on purpose: accepts `Int` directly and parses `Text`/`Bytes`
    /// decimal representations, since text-protocol clients return
    /// `COUNT(*)` and status variables as strings.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse().ok(),
            _ => None,
        }
    }

    /// Render this value as display text.
    ///
    /// `Null` renders as the empty string; bytes are decoded lossily.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
