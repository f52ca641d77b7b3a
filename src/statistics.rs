use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::error::{ConvertError, Result};

/// Facts about a written output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputStatistics {
    pub total_components: usize,
    pub file_size_bytes: u64,
    pub output_file: PathBuf,
    pub last_modified: DateTime<Utc>,
}

/// Read the output back. `None` when the file is missing or cannot be read
/// as a JSON array; never an error.
pub fn collect_statistics(path: &Path, encoding: &'static Encoding) -> Option<OutputStatistics> {
    if !path.exists() {
        return None;
    }
    match read_statistics(path, encoding) {
        Ok(stats) => Some(stats),
        Err(e) => {
            error!("Failed to get statistics: {}", e);
            None
        }
    }
}

/// Read a document written in `encoding`. A byte order mark, if present,
/// takes precedence over the given charset and is stripped.
pub fn read_document(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ConvertError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid {}", path.display(), used.name()),
        )));
    }
    Ok(text.into_owned())
}

fn read_statistics(path: &Path, encoding: &'static Encoding) -> Result<OutputStatistics> {
    let text = read_document(path, encoding)?;
    let components: Vec<serde_json::Value> = serde_json::from_str(&text)?;
    let meta = fs::metadata(path)?;

    Ok(OutputStatistics {
        total_components: components.len(),
        file_size_bytes: meta.len(),
        output_file: path.to_path_buf(),
        last_modified: DateTime::<Utc>::from(meta.modified()?),
    })
}
