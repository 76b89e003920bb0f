//! rowdiff - Column-wise set difference for tabular data
//!
//! Compares two datasets (rows of named fields) and reports, per column,
//! the values that appear in only one of them, either over the whole
//! datasets or within groups sharing a group-by value.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use diff::DiffResult;
pub use model::Dataset;
