//! JSON array parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::error::ParseError;
use crate::model::{Dataset, Row};

use super::Parser;

/// Parser for JSON files holding an array of objects
pub struct JsonParser;

impl JsonParser {
    /// Read a JSON array of objects (or a single object) into a dataset
    pub fn read<R: Read>(&self, reader: R, source: &str) -> Result<Dataset, ParseError> {
        let value: JsonValue =
            serde_json::from_reader(reader).map_err(|e| ParseError::json(source, e))?;

        // Handle both arrays and single objects
        let array = match value {
            JsonValue::Array(arr) => arr,
            JsonValue::Object(_) => vec![value],
            _ => return Err(ParseError::json_shape(source, "expected an array or object")),
        };

        array
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::Object(obj) => {
                    let fields: IndexMap<String, String> = obj
                        .into_iter()
                        .filter_map(|(key, value)| json_to_text(value).map(|text| (key, text)))
                        .collect();
                    Ok(Row::new(fields, index + 1))
                }
                other => Err(ParseError::json_shape(
                    source,
                    format!("element {} is not an object: {}", index, other),
                )),
            })
            .collect()
    }
}

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Dataset, ParseError> {
        let file = File::open(path).map_err(|e| ParseError::open(path.display().to_string(), e))?;
        self.read(BufReader::new(file), &path.display().to_string())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

/// Field text for a JSON value; `null` means the field is absent
fn json_to_text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
