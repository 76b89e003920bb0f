//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::model::{Dataset, Row};

use super::Parser;

/// Parser for CSV files (tab-separated for `.tsv`)
pub struct CsvParser;

impl CsvParser {
    /// Read delimited text with a header row into a dataset.
    ///
    /// Field text is kept verbatim. A record shorter than the header leaves
    /// its trailing fields absent; fields beyond the header are dropped.
    pub fn read<R: Read>(&self, reader: R, delimiter: u8, source: &str) -> Result<Dataset, ParseError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ParseError::csv(source, e))?
            .clone();

        let mut dataset = Dataset::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| ParseError::csv(source, e))?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2); // +2 for 1-indexing and header

            let fields: IndexMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();

            dataset.push(Row::new(fields, line));
        }

        Ok(dataset)
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Dataset, ParseError> {
        let file = File::open(path).map_err(|e| ParseError::open(path.display().to_string(), e))?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        self.read(BufReader::new(file), delimiter, &path.display().to_string())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}
