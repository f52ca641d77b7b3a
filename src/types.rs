use calamine::Data;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::constants::{CELL_TIMESTAMP_FORMAT, CSS_FIELD, HTML_FIELD, REFERENCE_FIELD, TITLE_FIELD};

/// The canonical columns every component row is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Html,
    Css,
    Reference,
}

impl Field {
    /// All canonical fields, in output order
    pub const ALL: [Field; 4] = [Field::Title, Field::Html, Field::Css, Field::Reference];

    /// Column header used in the spreadsheet and key used in the JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => TITLE_FIELD,
            Field::Html => HTML_FIELD,
            Field::Css => CSS_FIELD,
            Field::Reference => REFERENCE_FIELD,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workbook flavours the loader knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookKind {
    Xlsx,
    Xls,
}

impl WorkbookKind {
    /// Detect the workbook kind from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" => Some(WorkbookKind::Xlsx),
            "xls" => Some(WorkbookKind::Xls),
            _ => None,
        }
    }
}

/// A raw cell value as read from the sheet, before cleanup
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Absent,
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Explicit string coercion. Absent cells have no text, so they can never
    /// turn into a placeholder like "None" or "NaN".
    pub fn coerce_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::Absent => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Absent,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Integer(*i),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
                Some(ts) => CellValue::Text(ts.format(CELL_TIMESTAMP_FORMAT).to_string()),
                None => CellValue::Text(cell.to_string()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            // Durations keep their serial display text
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One loaded sheet: a header row and the data rows beneath it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. Duplicate headers resolve to the first occurrence.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// A row after projection and cleanup. Every value is trimmed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanRow {
    pub title: String,
    pub html: String,
    pub css: String,
    pub reference: String,
}

/// One entry of the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "HTML")]
    pub html: String,
    #[serde(rename = "CSS")]
    pub css: String,
    #[serde(rename = "Reference")]
    pub reference: String,
}

impl From<CleanRow> for ComponentRecord {
    fn from(row: CleanRow) -> Self {
        Self {
            title: row.title,
            html: row.html,
            css: row.css,
            reference: row.reference,
        }
    }
}
