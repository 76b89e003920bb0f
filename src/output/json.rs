//! JSON output format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::diff::{ColumnDiffs, DiffResult, DiffStats, ValueDiff};
use crate::model::{ColumnSpec, Value};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonDiffOutput<'a> {
    old_file: String,
    new_file: String,
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<&'a ColumnSpec>,
    columns: Vec<JsonColumn<'a>>,
    stats: &'a DiffStats,
}

#[derive(Serialize)]
struct JsonColumn<'a> {
    column: &'a ColumnSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    diffs: Option<&'a [ValueDiff]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<JsonGroup<'a>>>,
}

/// Group keys may be tuples, so groups are a list rather than a JSON object
#[derive(Serialize)]
struct JsonGroup<'a> {
    key: &'a Value,
    diffs: &'a [ValueDiff],
}

impl OutputFormatter for JsonOutput {
    fn render(
        &self,
        diff: &DiffResult,
        old_path: &Path,
        new_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let (mode, group_by, columns) = match &diff.columns {
            ColumnDiffs::Flat(columns) => (
                "flat",
                None::<&ColumnSpec>,
                columns
                    .iter()
                    .map(|c| JsonColumn {
                        column: &c.column,
                        diffs: Some(c.diffs.as_slice()),
                        groups: None,
                    })
                    .collect::<Vec<_>>(),
            ),
            ColumnDiffs::Grouped(columns) => (
                "grouped",
                columns.first().map(|c| &c.group_by),
                columns
                    .iter()
                    .map(|c| JsonColumn {
                        column: &c.column,
                        diffs: None,
                        groups: Some(
                            c.groups
                                .iter()
                                .map(|(key, diffs)| JsonGroup { key, diffs })
                                .collect(),
                        ),
                    })
                    .collect(),
            ),
        };

        let output = JsonDiffOutput {
            old_file: old_path.display().to_string(),
            new_file: new_path.display().to_string(),
            mode,
            group_by,
            columns,
            stats: &diff.stats,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
