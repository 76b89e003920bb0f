//! Row and Dataset data structures

use indexmap::IndexMap;

use super::value::Value;

/// A row: field name to field text.
///
/// Rows in one dataset need not share the same fields; a field that is not
/// present reads back as [`Value::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Fields in source order
    fields: IndexMap<String, String>,
    /// Original line/record number in source file (1-indexed, 0 if unknown)
    pub source_line: usize,
}

impl Row {
    /// Create a row from its fields
    pub fn new(fields: IndexMap<String, String>, source_line: usize) -> Self {
        Self {
            fields,
            source_line,
        }
    }

    /// Build a row from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source_line: 0,
        }
    }

    /// Get the raw text of a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a field as a [`Value`], absent if missing
    pub fn value(&self, name: &str) -> Value {
        self.get(name).into()
    }

    /// Field names in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered sequence of rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field names of the first row, the default column set
    pub fn first_row_columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<Row> for Dataset {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
