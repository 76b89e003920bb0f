//! Whole-dataset diff, one result per column

use rayon::prelude::*;

use crate::model::{ColumnSpec, Dataset};

use super::columnar::ColumnarView;
use super::set_diff::column_diff;
use super::ColumnDiff;

/// Diff every requested column across the two datasets.
///
/// Returns one [`ColumnDiff`] per column, in the order given, including
/// columns without differences.
pub fn flat_diff(columns: &[ColumnSpec], old: &Dataset, new: &Dataset) -> Vec<ColumnDiff> {
    let old_view = ColumnarView::build(old.rows(), Some(columns));
    let new_view = ColumnarView::build(new.rows(), Some(columns));

    columns
        .par_iter()
        .map(|spec| {
            let diffs = column_diff(old_view.get(spec), new_view.get(spec));
            log::debug!("column {}: {} value(s) differ", spec, diffs.len());
            ColumnDiff::new(spec.clone(), diffs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{Side, ValueDiff};
    use crate::model::{Row, Value};

    fn dataset(rows: &[&[(&str, &str)]]) -> Dataset {
        rows.iter()
            .map(|pairs| Row::from_pairs(pairs.iter().copied()))
            .collect()
    }

    fn specs(columns: &[&str]) -> Vec<ColumnSpec> {
        ColumnSpec::parse_all(columns).unwrap()
    }

    #[test]
    fn test_added_value() {
        let old = dataset(&[&[("id", "1"), ("name", "alice")]]);
        let new = dataset(&[
            &[("id", "1"), ("name", "alice")],
            &[("id", "2"), ("name", "bob")],
        ]);

        let result = flat_diff(&specs(&["name"]), &old, &new);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].column.to_string(), "name");
        assert_eq!(result[0].diffs, vec![ValueDiff::new("bob".into(), Side::New)]);
    }

    #[test]
    fn test_identity() {
        let data = dataset(&[
            &[("id", "1"), ("name", "alice")],
            &[("id", "2"), ("name", "bob")],
        ]);

        let result = flat_diff(&specs(&["id", "name", "id,name"]), &data, &data.clone());

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|d| !d.is_non_empty()));
    }

    #[test]
    fn test_keeps_column_order_and_empty_diffs() {
        let old = dataset(&[&[("a", "1"), ("b", "1"), ("c", "1")]]);
        let new = dataset(&[&[("a", "1"), ("b", "2"), ("c", "1")]]);

        let result = flat_diff(&specs(&["c", "b", "a"]), &old, &new);

        let order: Vec<_> = result.iter().map(|d| d.column.to_string()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert!(!result[0].is_non_empty());
        assert!(result[1].is_non_empty());
        assert!(!result[2].is_non_empty());
    }

    #[test]
    fn test_composite_column() {
        let old = dataset(&[&[("team", "x"), ("id", "1")], &[("team", "y"), ("id", "2")]]);
        let new = dataset(&[&[("team", "x"), ("id", "1")], &[("team", "x"), ("id", "3")]]);

        let result = flat_diff(&specs(&["team,id"]), &old, &new);

        assert_eq!(
            result[0].diffs,
            vec![
                ValueDiff::new(Value::Tuple(vec!["y".into(), "2".into()]), Side::Old),
                ValueDiff::new(Value::Tuple(vec!["x".into(), "3".into()]), Side::New),
            ]
        );
    }

    #[test]
    fn test_composite_matches_zipped_columns() {
        let old = dataset(&[&[("x", "1"), ("y", "a")], &[("x", "2"), ("y", "b")]]);
        let new = dataset(&[&[("x", "1"), ("y", "b")], &[("x", "2"), ("y", "b")]]);

        let columns = specs(&["x", "y"]);
        let zip = |data: &Dataset| -> Vec<Value> {
            let view = ColumnarView::build(data.rows(), Some(columns.as_slice()));
            view.get(&columns[0])
                .iter()
                .zip(view.get(&columns[1]))
                .map(|(x, y)| Value::Tuple(vec![x.clone(), y.clone()]))
                .collect()
        };

        let expected = column_diff(&zip(&old), &zip(&new));
        let result = flat_diff(&specs(&["x,y"]), &old, &new);
        assert_eq!(result[0].diffs, expected);
    }

    #[test]
    fn test_missing_fields() {
        let old = dataset(&[&[("id", "1")], &[("id", "2"), ("name", "bob")]]);
        let new = dataset(&[&[("id", "1"), ("name", "bob")]]);

        let result = flat_diff(&specs(&["name", "nowhere"]), &old, &new);

        assert_eq!(result[0].diffs, vec![ValueDiff::new(Value::Absent, Side::Old)]);
        assert!(!result[1].is_non_empty());
    }

    #[test]
    fn test_empty_datasets() {
        let result = flat_diff(&specs(&["id"]), &Dataset::new(), &Dataset::new());
        assert_eq!(result.len(), 1);
        assert!(!result[0].is_non_empty());
    }
}
