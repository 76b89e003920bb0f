//! Colored terminal output

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use termcolor::{Ansi, Color, ColorSpec, NoColor, WriteColor};

use crate::diff::{ColumnDiff, ColumnDiffs, DiffResult, GroupedColumnDiff, Side, ValueDiff};

use super::OutputFormatter;

/// Width column headers are padded to
const HEADER_WIDTH: usize = 80;

/// Terminal output, optionally colored
pub struct TerminalOutput {
    color: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn write_diffs<W: WriteColor>(&self, diff: &DiffResult, writer: &mut W) -> io::Result<()> {
        match &diff.columns {
            ColumnDiffs::Flat(columns) => {
                for column in columns.iter().filter(|c| c.is_non_empty()) {
                    self.write_column(column, writer)?;
                }
            }
            ColumnDiffs::Grouped(columns) => {
                for column in columns.iter().filter(|c| c.is_non_empty()) {
                    self.write_grouped_column(column, writer)?;
                }
            }
        }
        Ok(())
    }

    fn write_column<W: WriteColor>(&self, column: &ColumnDiff, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", column_header(&column.column.to_string()))?;
        for diff in &column.diffs {
            write_value_diff(diff, "", writer)?;
        }
        Ok(())
    }

    fn write_grouped_column<W: WriteColor>(
        &self,
        column: &GroupedColumnDiff,
        writer: &mut W,
    ) -> io::Result<()> {
        writeln!(writer, "{}", column_header(&column.column.to_string()))?;
        for (key, diffs) in column.changed_groups() {
            writeln!(writer, "{} group {}", column.group_by, key)?;
            for diff in diffs {
                write_value_diff(diff, " ", writer)?;
            }
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(
        &self,
        diff: &DiffResult,
        _old_path: &Path,
        _new_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        if self.color {
            self.write_diffs(diff, &mut Ansi::new(writer))?;
        } else {
            self.write_diffs(diff, &mut NoColor::new(writer))?;
        }
        Ok(())
    }
}

/// `= name =` padded with `=` to the header width
pub fn column_header(name: &str) -> String {
    format!("{:=<width$}", format!("= {} =", name), width = HEADER_WIDTH)
}

fn write_value_diff<W: WriteColor>(diff: &ValueDiff, indent: &str, writer: &mut W) -> io::Result<()> {
    let color = match diff.side {
        Side::New => Color::Green,
        Side::Old => Color::Red,
    };
    write!(writer, "{}", indent)?;
    writer.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(writer, "{}", diff.line())?;
    writer.reset()?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{ColumnSpec, Dataset, Row};

    fn teams() -> (Dataset, Dataset) {
        let old: Dataset = vec![
            Row::from_pairs([("team", "x"), ("id", "1")]),
            Row::from_pairs([("team", "y"), ("id", "2")]),
        ]
        .into_iter()
        .collect();
        let new: Dataset = vec![
            Row::from_pairs([("team", "x"), ("id", "1")]),
            Row::from_pairs([("team", "x"), ("id", "3")]),
        ]
        .into_iter()
        .collect();
        (old, new)
    }

    fn render(output: &TerminalOutput, diff: &DiffResult) -> String {
        let mut buf = Vec::new();
        output
            .render(diff, Path::new("a.csv"), Path::new("b.csv"), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_column_header() {
        let header = column_header("name");
        assert_eq!(header.len(), HEADER_WIDTH);
        assert!(header.starts_with("= name ="));
        assert!(header.ends_with("=="));
    }

    #[test]
    fn test_flat_plain_output() {
        let (old, new) = teams();
        let engine = DiffEngine::new(ColumnSpec::parse_all(["team", "id", "missing"]).unwrap(), None);

        let text = render(&TerminalOutput::new(), &engine.diff(&old, &new));

        let expected = format!(
            "{}\n- y\n{}\n- 2\n+ 3\n",
            column_header("team"),
            column_header("id")
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_grouped_plain_output() {
        let (old, new) = teams();
        let engine = DiffEngine::new(
            ColumnSpec::parse_all(["id"]).unwrap(),
            Some(ColumnSpec::parse("team").unwrap()),
        );

        let text = render(&TerminalOutput::new(), &engine.diff(&old, &new));

        assert_eq!(text, format!("{}\nteam group x\n + 3\n", column_header("id")));
    }

    #[test]
    fn test_colored_output() {
        let (old, new) = teams();
        let engine = DiffEngine::new(ColumnSpec::parse_all(["id"]).unwrap(), None);

        let text = render(&TerminalOutput::with_color(true), &engine.diff(&old, &new));

        assert!(text.contains("\u{1b}[31m- 2"));
        assert!(text.contains("\u{1b}[32m+ 3"));
        assert!(text.contains("\u{1b}[0m\n"));
    }

    #[test]
    fn test_no_output_without_differences() {
        let (old, _) = teams();
        let engine = DiffEngine::new(ColumnSpec::parse_all(["id"]).unwrap(), None);

        assert!(render(&TerminalOutput::new(), &engine.diff(&old, &old)).is_empty());
    }
}
