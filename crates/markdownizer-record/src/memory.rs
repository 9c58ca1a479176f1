//! In-memory record for testing.
//!
//! Provides [`MemoryRecord`] for tests that need a [`Record`] without a
//! database.

use std::collections::BTreeMap;

use crate::record::Record;

/// Record holding its columns in memory.
///
/// # Example
///
/// ```ignore
/// use markdownizer_record::{MemoryRecord, Record};
///
/// let post = MemoryRecord::new("Post")
///     .with_value("body", "# Hello")
///     .with_column("rendered_body");
///
/// assert_eq!(post.read("body"), Some("# Hello"));
/// assert_eq!(post.read("rendered_body"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRecord {
    type_name: String,
    columns: BTreeMap<String, Option<String>>,
}

impl MemoryRecord {
    /// Create a record of the named type with no columns.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Add an unset column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.entry(column.into()).or_insert(None);
        self
    }

    /// Add a column holding `value`.
    #[must_use]
    pub fn with_value(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), Some(value.into()));
        self
    }
}

impl Record for MemoryRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    fn read(&self, column: &str) -> Option<&str> {
        self.columns.get(column)?.as_deref()
    }

    fn write(&mut self, column: &str, value: String) {
        self.columns.insert(column.to_owned(), Some(value));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_columns() {
        let record = MemoryRecord::new("Post")
            .with_column("b")
            .with_value("a", "1");
        assert_eq!(record.type_name(), "Post");
        assert_eq!(record.column_names(), vec!["a", "b"]);
        assert_eq!(record.read("a"), Some("1"));
        assert_eq!(record.read("b"), None);
        assert_eq!(record.read("missing"), None);
    }

    #[test]
    fn test_with_column_keeps_value() {
        let record = MemoryRecord::new("Post")
            .with_value("a", "1")
            .with_column("a");
        assert_eq!(record.read("a"), Some("1"));
    }

    #[test]
    fn test_write() {
        let mut record = MemoryRecord::new("Post").with_column("a");
        record.write("a", "x".to_owned());
        assert_eq!(record.read("a"), Some("x"));
    }
}
