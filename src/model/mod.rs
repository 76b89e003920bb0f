//! Data model for tabular data representation

mod column;
mod table;
mod value;

pub use column::{ColumnSpec, COMPOSITE_SEPARATOR};
pub use table::{Dataset, Row};
pub use value::Value;
