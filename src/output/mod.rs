//! Output formatting for diff results

mod json;
mod terminal;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::diff::DiffResult;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render diff result to a writer
    fn render(
        &self,
        diff: &DiffResult,
        old_path: &Path,
        new_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, color: bool) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::with_color(color)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render diff result to stdout
pub fn render_to_stdout(
    diff: &DiffResult,
    old_path: &Path,
    new_path: &Path,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    let formatter = OutputFactory::create(format, color);
    let mut stdout = std::io::stdout().lock();
    formatter.render(diff, old_path, new_path, &mut stdout)
}
