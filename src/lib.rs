pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod statistics;
pub mod types;

pub use config::{ConfigOverrides, ConverterConfig};
pub use error::{ConvertError, Result};
pub use pipeline::{ConversionReport, Converter};
pub use statistics::OutputStatistics;
pub use types::{CellValue, CleanRow, ComponentRecord, Field, Table, WorkbookKind};
