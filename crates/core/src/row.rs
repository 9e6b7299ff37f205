//! Query result rows.
//!
//! A [`Row`] preserves the column order reported by the server, which is
//! why it is a vec of pairs rather than a hash map.

use crate::value::Value;

/// An ordered sequence of rows, as returned by one statement execution.
pub type QueryResult = Vec<Row>;

/// One result row: an insertion-ordered mapping from column name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Columns keep the order they were appended in.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.entries.push((column.into(), value));
    }

    /// Look up a value by column name (first match wins).
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in server order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over `(column, value)` pairs in server order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
