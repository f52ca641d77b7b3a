use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Spreadsheet not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid spreadsheet format: {extension:?} ({})", path.display())]
    Format { path: PathBuf, extension: String },

    #[error("Failed to load sheet '{sheet}' from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Missing required columns: {missing:?}")]
    Schema { missing: Vec<String> },

    #[error("No valid data to export")]
    NoRecords,

    #[error("Output file was not created: {}", .0.display())]
    WriteVerification(PathBuf),

    #[error("Output contains characters that cannot be encoded as {encoding}")]
    Encoding { encoding: &'static str },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
