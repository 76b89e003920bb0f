//! Configuration handling for rowdiff

use std::path::PathBuf;

use indexmap::IndexSet;

use crate::error::SpecError;
use crate::model::{ColumnSpec, Dataset};

/// Output format for diff results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for diff operations
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the first (old) file
    pub old_file: PathBuf,
    /// Path to the second (new) file
    pub new_file: PathBuf,
    /// Columns to diff; a comma-joined name is a composite column
    pub columns: Vec<String>,
    /// Columns to leave out of the diff
    pub ignore_columns: Vec<String>,
    /// Also diff every column of the first row
    pub all_columns: bool,
    /// Column to group rows by before diffing
    pub group_by: Option<String>,
    /// Output format
    pub output_format: OutputFormat,
    /// Emit ANSI colors in terminal output
    pub color: bool,
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(old_file: PathBuf, new_file: PathBuf) -> Self {
        Self {
            old_file,
            new_file,
            ..Default::default()
        }
    }

    /// Set columns to diff
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Set columns to ignore
    pub fn with_ignore_columns(mut self, columns: Vec<String>) -> Self {
        self.ignore_columns = columns;
        self
    }

    /// Diff all columns of the first row
    pub fn with_all_columns(mut self, all: bool) -> Self {
        self.all_columns = all;
        self
    }

    /// Set group-by column
    pub fn with_group_by(mut self, column: String) -> Self {
        self.group_by = Some(column);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Resolve the column specifications to diff.
    ///
    /// Explicit columns come first, in order; with `all_columns` the fields
    /// of the first row (of `old`, or of `new` when `old` is empty) follow.
    /// Duplicates are dropped, then ignored columns are removed.
    pub fn resolve_columns(&self, old: &Dataset, new: &Dataset) -> Result<Vec<ColumnSpec>, SpecError> {
        let mut names: IndexSet<String> = self.columns.iter().cloned().collect();

        if self.all_columns {
            let first = if old.is_empty() { new } else { old };
            names.extend(first.first_row_columns());
        }

        for ignored in &self.ignore_columns {
            names.shift_remove(ignored);
        }

        ColumnSpec::parse_all(&names)
    }

    /// Parse the group-by column, if any
    pub fn group_by_spec(&self) -> Result<Option<ColumnSpec>, SpecError> {
        self.group_by.as_deref().map(ColumnSpec::parse).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    fn dataset(keys: &[&str]) -> Dataset {
        vec![Row::from_pairs(keys.iter().map(|k| (*k, "v")))]
            .into_iter()
            .collect()
    }

    fn names(specs: &[ColumnSpec]) -> Vec<String> {
        specs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_columns() {
        let config = Config::default().with_columns(vec!["b".into(), "a,c".into(), "b".into()]);
        let specs = config
            .resolve_columns(&Dataset::new(), &Dataset::new())
            .unwrap();

        assert_eq!(names(&specs), vec!["b", "a,c"]);
        assert!(specs[1].is_composite());
    }

    #[test]
    fn test_all_columns_with_ignore() {
        let config = Config::default()
            .with_columns(vec!["x,y".into()])
            .with_all_columns(true)
            .with_ignore_columns(vec!["b".into()]);

        let specs = config
            .resolve_columns(&dataset(&["a", "b", "c"]), &dataset(&["z"]))
            .unwrap();

        assert_eq!(names(&specs), vec!["x,y", "a", "c"]);
    }

    #[test]
    fn test_all_columns_falls_back_to_second_dataset() {
        let config = Config::default().with_all_columns(true);
        let specs = config
            .resolve_columns(&Dataset::new(), &dataset(&["z"]))
            .unwrap();

        assert_eq!(names(&specs), vec!["z"]);
    }

    #[test]
    fn test_group_by_spec() {
        assert_eq!(Config::default().group_by_spec().unwrap(), None);
        assert_eq!(
            Config::default()
                .with_group_by("team".into())
                .group_by_spec()
                .unwrap(),
            Some(ColumnSpec::Simple("team".into()))
        );
        assert!(Config::default().with_group_by(String::new()).group_by_spec().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
