//! Parameterized statement construction.
//!
//! Two rules keep the harness injection-safe:
//!
//! 1. Every *value* travels as a bound positional parameter, never
//!    interpolated into statement text.
//! 2. Identifiers (scratch table names) cannot be bound, so they are
//!    generated by [`scratch_table_name`] and gated by
//!    [`is_safe_identifier`] before they reach statement text.
//!
//! Scratch names embed a random UUID suffix rather than a timestamp, so
//! two runs in the same second never collide.

use crate::value::Value;
use uuid::Uuid;

/// A statement plus its positional parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    params: Vec<Value>,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// The statement text, with `?` placeholders for parameters.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A random token usable in identifiers and payloads: 32 lowercase hex chars.
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate a collision-safe scratch table name: `{prefix}_{random}`.
///
/// The prefix must itself be a safe identifier; the result always is.
pub fn scratch_table_name(prefix: &str) -> String {
    debug_assert!(is_safe_identifier(prefix), "unsafe prefix: {prefix}");
    format!("{}_{}", prefix, unique_suffix())
}

/// True if `name` can be interpolated into statement text as an identifier.
///
/// ASCII letters, digits and underscores only, starting with a letter or
/// underscore, at most 64 chars (the MySQL identifier limit).
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 64 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
