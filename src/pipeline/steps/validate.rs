use tracing::{info, instrument, warn};

use crate::error::{ConvertError, Result};
use crate::types::{CellValue, CleanRow, Field, Table};

/// Output of the cleanup step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedRows {
    pub rows: Vec<CleanRow>,
    /// Rows removed because Title or HTML was absent
    pub dropped: usize,
}

/// Check the required columns, project the table down to them, drop rows
/// with no Title or HTML, and trim every remaining value.
#[instrument(skip_all, fields(rows = table.len()))]
pub fn validate_rows(table: &Table, required_fields: &[String]) -> Result<CleanedRows> {
    info!("🔍 Validating data...");

    let mut missing: Vec<String> = required_fields
        .iter()
        .filter(|name| !table.has_column(name))
        .cloned()
        .collect();
    // The canonical columns are always read below, listed or not
    for field in Field::ALL {
        if !table.has_column(field.as_str()) && !missing.iter().any(|m| m == field.as_str()) {
            missing.push(field.as_str().to_string());
        }
    }
    if !missing.is_empty() {
        return Err(ConvertError::Schema { missing });
    }

    info!("Available columns: {:?}", table.columns());

    let index = |field: Field| table.column_index(field.as_str()).unwrap_or_default();
    let [title_idx, html_idx, css_idx, reference_idx] = Field::ALL.map(index);

    let mut rows = Vec::with_capacity(table.len());
    let mut dropped = 0;

    for row in table.rows() {
        let cell = |idx: usize| row.get(idx).unwrap_or(&CellValue::Absent);

        if cell(title_idx).is_absent() || cell(html_idx).is_absent() {
            dropped += 1;
            continue;
        }

        rows.push(CleanRow {
            title: clean(cell(title_idx)),
            html: clean(cell(html_idx)),
            css: clean(cell(css_idx)),
            reference: clean(cell(reference_idx)),
        });
    }

    if dropped > 0 {
        warn!("Removed {} rows with missing Title or HTML", dropped);
    }
    info!("Validated data: {} valid rows", rows.len());

    Ok(CleanedRows { rows, dropped })
}

// Trim first, then default; an absent cell becomes "" rather than a stringified null
fn clean(cell: &CellValue) -> String {
    cell.coerce_text()
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::default_required_fields;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn missing_columns_are_enumerated() {
        let t = table(&["Title", "Notes", "CSS"], vec![]);
        match validate_rows(&t, &default_required_fields()) {
            Err(ConvertError::Schema { missing }) => {
                assert_eq!(missing, vec!["HTML".to_string(), "Reference".to_string()])
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn extra_required_fields_must_exist() {
        let t = table(&["Title", "HTML", "CSS", "Reference"], vec![]);
        let mut required = default_required_fields();
        required.push("Category".into());
        match validate_rows(&t, &required) {
            Err(ConvertError::Schema { missing }) => assert_eq!(missing, vec!["Category"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_title_or_html_are_dropped() {
        let t = table(
            &["Title", "HTML", "CSS", "Reference"],
            vec![
                vec![text("A"), text("<p>"), CellValue::Absent, CellValue::Absent],
                vec![CellValue::Absent, text("<p>"), text("p{}"), CellValue::Absent],
                vec![text("B"), CellValue::Absent, CellValue::Absent, CellValue::Absent],
                vec![text("C")],
            ],
        );
        let cleaned = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(cleaned.dropped, 3);
        assert_eq!(cleaned.rows.len(), 1);
        assert_eq!(cleaned.rows[0].title, "A");

        // Same input, same count
        let again = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(again, cleaned);
    }

    #[test]
    fn values_are_trimmed_and_absent_becomes_empty() {
        let t = table(
            &["Reference", "Title", "Extra", "HTML", "CSS"],
            vec![vec![
                CellValue::Absent,
                text("  Button  "),
                text("ignored"),
                text("\n<button></button>\t"),
                CellValue::Absent,
            ]],
        );
        let cleaned = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(
            cleaned.rows,
            vec![CleanRow {
                title: "Button".into(),
                html: "<button></button>".into(),
                css: String::new(),
                reference: String::new(),
            }]
        );
    }

    #[test]
    fn blank_titles_survive_the_null_gate() {
        let t = table(
            &["Title", "HTML", "CSS", "Reference"],
            vec![vec![text("   "), text("<p>"), text(""), text("")]],
        );
        let cleaned = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(cleaned.dropped, 0);
        assert_eq!(cleaned.rows[0].title, "");
    }

    #[test]
    fn empty_string_title_is_kept_here_and_skipped_when_shaped() {
        let t = table(
            &["Title", "HTML", "CSS", "Reference"],
            vec![
                vec![text("A"), text("<p>"), CellValue::Absent, CellValue::Absent],
                vec![text(""), text("<p>"), CellValue::Absent, CellValue::Absent],
            ],
        );
        let cleaned = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(cleaned.dropped, 0);
        assert_eq!(cleaned.rows.len(), 2);

        let shaped = crate::pipeline::steps::shape_records(cleaned.rows);
        assert_eq!(shaped.skipped, 1);
        assert_eq!(
            serde_json::to_value(&shaped.records).unwrap(),
            serde_json::json!([{"Title": "A", "HTML": "<p>", "CSS": "", "Reference": ""}])
        );
    }

    #[test]
    fn numeric_cells_are_coerced() {
        let t = table(
            &["Title", "HTML", "CSS", "Reference"],
            vec![vec![
                CellValue::Integer(404),
                text("<h1>Not found</h1>"),
                CellValue::Number(1.5),
                CellValue::Absent,
            ]],
        );
        let cleaned = validate_rows(&t, &default_required_fields()).unwrap();
        assert_eq!(cleaned.rows[0].title, "404");
        assert_eq!(cleaned.rows[0].css, "1.5");
    }
}
