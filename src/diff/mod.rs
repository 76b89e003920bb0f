//! Diff engine for comparing datasets column by column

mod columnar;
mod flat;
mod grouped;
mod set_diff;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Config;
use crate::error::SpecError;
use crate::model::{ColumnSpec, Dataset, Value};

pub use columnar::ColumnarView;
pub use flat::flat_diff;
pub use grouped::grouped_diff;
pub use set_diff::column_diff;

/// Which dataset a value was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Only in the first (old) dataset
    Old,
    /// Only in the second (new) dataset
    New,
}

impl Side {
    /// The other side
    pub fn flip(self) -> Self {
        match self {
            Side::Old => Side::New,
            Side::New => Side::Old,
        }
    }

    /// Line prefix used when rendering
    pub fn marker(self) -> char {
        match self {
            Side::Old => '-',
            Side::New => '+',
        }
    }
}

/// A value present in exactly one of the two compared columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValueDiff {
    pub value: Value,
    pub side: Side,
}

impl ValueDiff {
    pub fn new(value: Value, side: Side) -> Self {
        Self { value, side }
    }

    /// Value was only in the second dataset
    pub fn is_added(&self) -> bool {
        self.side == Side::New
    }

    /// Plain display line, e.g. `+ bob`
    pub fn line(&self) -> String {
        format!("{} {}", self.side.marker(), self.value)
    }
}

impl std::fmt::Display for ValueDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.side.marker(), self.value)
    }
}

/// Differences for one column over whole datasets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDiff {
    pub column: ColumnSpec,
    /// Old-only values first, then new-only values
    pub diffs: Vec<ValueDiff>,
}

impl ColumnDiff {
    pub fn new(column: ColumnSpec, diffs: Vec<ValueDiff>) -> Self {
        Self { column, diffs }
    }

    pub fn is_non_empty(&self) -> bool {
        !self.diffs.is_empty()
    }
}

/// Differences for one column, computed separately inside each group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedColumnDiff {
    pub column: ColumnSpec,
    pub group_by: ColumnSpec,
    /// Exactly the groups present in both datasets
    pub groups: BTreeMap<Value, Vec<ValueDiff>>,
    /// Groups only in the first dataset (not compared)
    pub old_only_groups: usize,
    /// Groups only in the second dataset (not compared)
    pub new_only_groups: usize,
}

impl GroupedColumnDiff {
    pub fn is_non_empty(&self) -> bool {
        self.groups.values().any(|diffs| !diffs.is_empty())
    }

    /// Groups that have at least one difference
    pub fn changed_groups(&self) -> impl Iterator<Item = (&Value, &Vec<ValueDiff>)> {
        self.groups.iter().filter(|(_, diffs)| !diffs.is_empty())
    }

    /// All value diffs across groups
    pub fn value_diffs(&self) -> impl Iterator<Item = &ValueDiff> {
        self.groups.values().flatten()
    }
}

/// Per-column results of either mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDiffs {
    Flat(Vec<ColumnDiff>),
    Grouped(Vec<GroupedColumnDiff>),
}

impl ColumnDiffs {
    pub fn len(&self) -> usize {
        match self {
            ColumnDiffs::Flat(diffs) => diffs.len(),
            ColumnDiffs::Grouped(diffs) => diffs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns with at least one difference
    pub fn changed_count(&self) -> usize {
        match self {
            ColumnDiffs::Flat(diffs) => diffs.iter().filter(|d| d.is_non_empty()).count(),
            ColumnDiffs::Grouped(diffs) => diffs.iter().filter(|d| d.is_non_empty()).count(),
        }
    }

    /// Every value diff, across columns and groups
    pub fn value_diffs(&self) -> Box<dyn Iterator<Item = &ValueDiff> + '_> {
        match self {
            ColumnDiffs::Flat(diffs) => Box::new(diffs.iter().flat_map(|d| d.diffs.iter())),
            ColumnDiffs::Grouped(diffs) => Box::new(diffs.iter().flat_map(|d| d.value_diffs())),
        }
    }
}

/// Statistics about the diff
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub old_row_count: usize,
    pub new_row_count: usize,
    pub columns_compared: usize,
    pub columns_changed: usize,
    pub values_only_in_old: usize,
    pub values_only_in_new: usize,
    pub groups_only_in_old: usize,
    pub groups_only_in_new: usize,
}

impl DiffStats {
    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.columns_changed > 0
    }
}

/// Result of comparing two datasets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub columns: ColumnDiffs,
    pub stats: DiffStats,
}

impl DiffResult {
    fn new(columns: ColumnDiffs, old: &Dataset, new: &Dataset) -> Self {
        let mut stats = DiffStats {
            old_row_count: old.row_count(),
            new_row_count: new.row_count(),
            columns_compared: columns.len(),
            columns_changed: columns.changed_count(),
            ..Default::default()
        };
        for diff in columns.value_diffs() {
            match diff.side {
                Side::Old => stats.values_only_in_old += 1,
                Side::New => stats.values_only_in_new += 1,
            }
        }
        if let ColumnDiffs::Grouped(diffs) = &columns {
            if let Some(first) = diffs.first() {
                stats.groups_only_in_old = first.old_only_groups;
                stats.groups_only_in_new = first.new_only_groups;
            }
        }
        Self { columns, stats }
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.stats.has_changes()
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self.columns, ColumnDiffs::Grouped(_))
    }
}

/// Main diff engine
#[derive(Debug, Clone)]
pub struct DiffEngine {
    columns: Vec<ColumnSpec>,
    group_by: Option<ColumnSpec>,
}

impl DiffEngine {
    /// Create a diff engine over the given columns, grouped if `group_by` is set
    pub fn new(columns: Vec<ColumnSpec>, group_by: Option<ColumnSpec>) -> Self {
        Self { columns, group_by }
    }

    /// Resolve columns and grouping from configuration
    pub fn from_config(config: &Config, old: &Dataset, new: &Dataset) -> Result<Self, SpecError> {
        Ok(Self::new(
            config.resolve_columns(old, new)?,
            config.group_by_spec()?,
        ))
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn group_by(&self) -> Option<&ColumnSpec> {
        self.group_by.as_ref()
    }

    /// Compare two datasets
    pub fn diff(&self, old: &Dataset, new: &Dataset) -> DiffResult {
        log::debug!(
            "diffing {} column(s) over {} and {} row(s)",
            self.columns.len(),
            old.row_count(),
            new.row_count()
        );
        let columns = match &self.group_by {
            Some(group_by) => {
                ColumnDiffs::Grouped(grouped_diff(&self.columns, group_by, old, new))
            }
            None => ColumnDiffs::Flat(flat_diff(&self.columns, old, new)),
        };
        DiffResult::new(columns, old, new)
    }
}

/// Convenience function to compute diff
pub fn compute_diff(old: &Dataset, new: &Dataset, config: &Config) -> Result<DiffResult, SpecError> {
    let engine = DiffEngine::from_config(config, old, new)?;
    Ok(engine.diff(old, new))
}
