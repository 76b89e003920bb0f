//! Error types for rowdiff

/// Errors reading a dataset from disk
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to open file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected JSON shape in {path}: {message}")]
    JsonShape { path: String, message: String },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },
}

/// Errors building column specifications
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("Empty column name in column specification {spec:?}")]
    EmptyColumnName { spec: String },
}

impl ParseError {
    pub fn open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn json_shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonShape {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }
}

impl SpecError {
    pub fn empty_column_name(spec: impl Into<String>) -> Self {
        Self::EmptyColumnName { spec: spec.into() }
    }
}
