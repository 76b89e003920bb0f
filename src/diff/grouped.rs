//! Per-group diff: rows are partitioned by a group-by column first

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::model::{ColumnSpec, Dataset, Row, Value};

use super::columnar::ColumnarView;
use super::set_diff::column_diff;
use super::GroupedColumnDiff;

/// Partition rows by their value for `group_by`, keeping row order
fn partition<'a>(rows: &'a [Row], group_by: &ColumnSpec) -> IndexMap<Value, Vec<&'a Row>> {
    let mut groups: IndexMap<Value, Vec<&Row>> = IndexMap::new();
    for row in rows {
        groups.entry(group_by.extract(row)).or_default().push(row);
    }
    groups
}

/// Partition a dataset and build one columnar view per group
fn grouped_views(
    dataset: &Dataset,
    columns: &[ColumnSpec],
    group_by: &ColumnSpec,
) -> IndexMap<Value, ColumnarView> {
    partition(dataset.rows(), group_by)
        .into_iter()
        .map(|(key, rows)| (key, ColumnarView::build(&rows, Some(columns))))
        .collect()
}

/// Diff every requested column within each group present in both datasets.
///
/// Groups found in only one dataset are not compared and never appear in
/// the result's group mapping; they are only counted.
pub fn grouped_diff(
    columns: &[ColumnSpec],
    group_by: &ColumnSpec,
    old: &Dataset,
    new: &Dataset,
) -> Vec<GroupedColumnDiff> {
    let old_groups = grouped_views(old, columns, group_by);
    let new_groups = grouped_views(new, columns, group_by);

    let mut common: Vec<(&Value, &ColumnarView, &ColumnarView)> = old_groups
        .iter()
        .filter_map(|(key, old_view)| new_groups.get(key).map(|new_view| (key, old_view, new_view)))
        .collect();
    common.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let old_only_groups = old_groups.len() - common.len();
    let new_only_groups = new_groups.len() - common.len();
    if old_only_groups > 0 || new_only_groups > 0 {
        log::info!(
            "{} group(s) only in the first dataset and {} only in the second were not compared (grouped by {})",
            old_only_groups,
            new_only_groups,
            group_by
        );
    }
    log::debug!("comparing {} common group(s)", common.len());

    columns
        .par_iter()
        .map(|spec| {
            let groups: BTreeMap<Value, _> = common
                .iter()
                .map(|(key, old_view, new_view)| {
                    ((*key).clone(), column_diff(old_view.get(spec), new_view.get(spec)))
                })
                .collect();
            GroupedColumnDiff {
                column: spec.clone(),
                group_by: group_by.clone(),
                groups,
                old_only_groups,
                new_only_groups,
            }
        })
        .collect()
}
