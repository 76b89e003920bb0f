//! Row-to-columnar transform

use std::borrow::Borrow;

use indexmap::IndexMap;

use crate::model::{ColumnSpec, Row, Value};

/// Per-column sequences of values extracted from a set of rows.
///
/// Each sequence is in row order. The view is built once and then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarView {
    columns: IndexMap<ColumnSpec, Vec<Value>>,
}

impl ColumnarView {
    /// Transform rows into columns.
    ///
    /// With no column list the fields of the first row are used. An empty
    /// row set gives an empty view whatever columns were requested.
    pub fn build<R: Borrow<Row>>(rows: &[R], columns: Option<&[ColumnSpec]>) -> Self {
        let Some(first) = rows.first() else {
            return Self::default();
        };

        let defaults: Vec<ColumnSpec>;
        let columns = match columns {
            Some(columns) => columns,
            None => {
                defaults = first
                    .borrow()
                    .keys()
                    .map(|k| ColumnSpec::Simple(k.to_string()))
                    .collect();
                &defaults
            }
        };

        let mut view: IndexMap<ColumnSpec, Vec<Value>> = columns
            .iter()
            .map(|spec| (spec.clone(), Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let row = row.borrow();
            for (spec, values) in view.iter_mut() {
                values.push(spec.extract(row));
            }
        }

        Self { columns: view }
    }

    /// Values for a column; empty if the column is not in the view
    pub fn get(&self, spec: &ColumnSpec) -> &[Value] {
        self.columns.get(spec).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, spec: &ColumnSpec) -> bool {
        self.columns.contains_key(spec)
    }

    /// Columns in the view, in request order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.keys()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ColumnSpec {
        ColumnSpec::parse(s).unwrap()
    }

    #[test]
    fn test_empty_rows_give_empty_view() {
        let rows: Vec<Row> = Vec::new();
        let view = ColumnarView::build(&rows, Some(&[spec("id")][..]));
        assert!(view.is_empty());
        assert!(view.get(&spec("id")).is_empty());
    }

    #[test]
    fn test_defaults_to_first_row_fields() {
        let rows = vec![
            Row::from_pairs([("id", "1"), ("name", "alice")]),
            Row::from_pairs([("id", "2"), ("extra", "x")]),
        ];
        let view = ColumnarView::build(&rows, None);

        let columns: Vec<_> = view.columns().map(|c| c.to_string()).collect();
        assert_eq!(columns, vec!["id", "name"]);
        assert_eq!(view.get(&spec("name")), &[Value::from("alice"), Value::Absent]);
        assert!(!view.contains(&spec("extra")));
    }

    #[test]
    fn test_preserves_row_order() {
        let rows = vec![
            Row::from_pairs([("id", "3")]),
            Row::from_pairs([("id", "1")]),
            Row::from_pairs([("id", "3")]),
        ];
        let view = ColumnarView::build(&rows, Some(&[spec("id")][..]));
        assert_eq!(
            view.get(&spec("id")),
            &[Value::from("3"), Value::from("1"), Value::from("3")]
        );
    }

    #[test]
    fn test_composite_columns() {
        let rows = vec![
            Row::from_pairs([("team", "x"), ("id", "1")]),
            Row::from_pairs([("id", "2")]),
        ];
        let view = ColumnarView::build(&rows, Some(&[spec("team,id")][..]));
        assert_eq!(
            view.get(&spec("team,id")),
            &[
                Value::Tuple(vec![Value::from("x"), Value::from("1")]),
                Value::Tuple(vec![Value::Absent, Value::from("2")]),
            ]
        );
    }

    #[test]
    fn test_borrowed_rows() {
        let rows = vec![Row::from_pairs([("id", "1")]), Row::from_pairs([("id", "2")])];
        let subset: Vec<&Row> = rows.iter().skip(1).collect();
        let view = ColumnarView::build(&subset, Some(&[spec("id")][..]));
        assert_eq!(view.get(&spec("id")), &[Value::from("2")]);
    }
}
