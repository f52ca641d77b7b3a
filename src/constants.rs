/// Default configuration values. These mirror the layout of the studio
/// repository: the workbook and the generated JSON both live under `data/`.

pub const DEFAULT_SOURCE_PATH: &str = "data/WebComponents (version 2025-02-04).xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Components";
pub const DEFAULT_OUTPUT_PATH: &str = "data/components.json";
pub const DEFAULT_TEXT_ENCODING: &str = "utf-8";

// Canonical column names, in output order
pub const TITLE_FIELD: &str = "Title";
pub const HTML_FIELD: &str = "HTML";
pub const CSS_FIELD: &str = "CSS";
pub const REFERENCE_FIELD: &str = "Reference";

/// Get the default required column list
pub fn default_required_fields() -> Vec<String> {
    vec![
        TITLE_FIELD.to_string(),
        HTML_FIELD.to_string(),
        CSS_FIELD.to_string(),
        REFERENCE_FIELD.to_string(),
    ]
}

/// Text form of date and time cells
pub const CELL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// JSON indentation for the output document
pub const OUTPUT_INDENT: &[u8] = b"    ";

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "studio_components=info,warn";
pub const LOG_FILE_PREFIX: &str = "studio-components.log";

/// Schema the output document is checked against by `validate-components`
pub const DEFAULT_SCHEMA_PATH: &str = "schemas/components.v1.json";
