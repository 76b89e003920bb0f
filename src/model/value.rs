//! Field values as seen by the diff engine

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single field value extracted from a row.
///
/// Values are opaque tokens: two values are equal only when they are
/// identical, with no trimming, case folding or numeric coercion. A field
/// that is missing from a row is represented by [`Value::Absent`], which
/// compares, hashes and sorts like any other value.
///
/// The derived ordering puts `Absent` first, then text (lexicographic),
/// then tuples (element-wise).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The field was not present in the row
    Absent,
    /// The field text exactly as read from the source
    Text(String),
    /// The per-row value of a composite column, one entry per named field
    Tuple(Vec<Value>),
}

impl Value {
    /// Check if the value is the absence marker
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Borrow the text of a simple value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Value::Absent => Cow::Borrowed("None"),
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Tuple(items) => {
                let inner: Vec<_> = items.iter().map(|v| v.display()).collect();
                Cow::Owned(format!("({})", inner.join(", ")))
            }
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Absent,
        }
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }
}
