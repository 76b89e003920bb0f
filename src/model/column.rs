//! Column specifications: single columns and composite keys

use serde::{Serialize, Serializer};

use crate::error::SpecError;

use super::table::Row;
use super::value::Value;

/// Separator that turns a column string into a composite key
pub const COMPOSITE_SEPARATOR: char = ',';

/// A column to diff on.
///
/// Composite columns extract the tuple of their named fields, in the order
/// listed. The textual form `"a,b"` is parsed once, at the boundary, by
/// [`ColumnSpec::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnSpec {
    Simple(String),
    Composite(Vec<String>),
}

impl ColumnSpec {
    /// Parse a column string; a comma makes it composite
    pub fn parse(s: &str) -> Result<Self, SpecError> {
        if s.contains(COMPOSITE_SEPARATOR) {
            let names: Vec<String> = s.split(COMPOSITE_SEPARATOR).map(str::to_string).collect();
            if names.iter().any(|n| n.is_empty()) {
                return Err(SpecError::empty_column_name(s));
            }
            Ok(ColumnSpec::Composite(names))
        } else if s.is_empty() {
            Err(SpecError::empty_column_name(s))
        } else {
            Ok(ColumnSpec::Simple(s.to_string()))
        }
    }

    /// Parse a list of column strings
    pub fn parse_all<I, S>(columns: I) -> Result<Vec<Self>, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        columns.into_iter().map(|c| Self::parse(c.as_ref())).collect()
    }

    /// Underlying field names, in extraction order
    pub fn names(&self) -> &[String] {
        match self {
            ColumnSpec::Simple(name) => std::slice::from_ref(name),
            ColumnSpec::Composite(names) => names,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ColumnSpec::Composite(_))
    }

    /// Extract this column's value from a row
    pub fn extract(&self, row: &Row) -> Value {
        match self {
            ColumnSpec::Simple(name) => row.value(name),
            ColumnSpec::Composite(names) => {
                Value::Tuple(names.iter().map(|name| row.value(name)).collect())
            }
        }
    }
}

impl std::fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSpec::Simple(name) => write!(f, "{}", name),
            ColumnSpec::Composite(names) => write!(f, "{}", names.join(",")),
        }
    }
}

impl std::str::FromStr for ColumnSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ColumnSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
