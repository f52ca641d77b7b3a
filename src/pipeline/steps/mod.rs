//! The conversion steps, in the order the converter runs them.

pub mod load;
pub mod output;
pub mod paths;
pub mod shape;
pub mod validate;

pub use load::load_table;
pub use output::{encode_document, render_json, write_output};
pub use paths::validate_paths;
pub use shape::{shape_records, ShapedRecords};
pub use validate::{validate_rows, CleanedRows};
