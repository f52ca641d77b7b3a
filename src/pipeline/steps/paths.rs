use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::{ConvertError, Result};
use crate::types::WorkbookKind;

/// Check the source workbook and make sure the output directory exists.
/// Returns the detected workbook kind for the loader.
#[instrument(skip_all, fields(source = %source_path.display()))]
pub fn validate_paths(source_path: &Path, output_path: &Path) -> Result<WorkbookKind> {
    if !source_path.exists() {
        return Err(ConvertError::NotFound(source_path.to_path_buf()));
    }

    let kind = WorkbookKind::from_path(source_path).ok_or_else(|| ConvertError::Format {
        path: source_path.to_path_buf(),
        extension: source_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    })?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
        debug!("Output directory ready: {}", parent.display());
    }

    Ok(kind)
}
