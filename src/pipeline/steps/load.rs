use calamine::{open_workbook, Data, Range, Reader, Xls, Xlsx};
use std::path::Path;
use tracing::{info, instrument};

use crate::error::{ConvertError, Result};
use crate::types::{CellValue, Table, WorkbookKind};

/// Read the named sheet into a `Table`. The first row of the sheet is the
/// header row.
#[instrument(skip_all, fields(sheet = %sheet_name))]
pub fn load_table(path: &Path, sheet_name: &str, kind: WorkbookKind) -> Result<Table> {
    info!("📂 Loading workbook: {}", path.display());

    let range = read_range(path, sheet_name, kind).map_err(|source| ConvertError::Load {
        path: path.to_path_buf(),
        sheet: sheet_name.to_string(),
        source,
    })?;

    let table = table_from_range(&range);
    info!("✅ Loaded {} rows from sheet '{}'", table.len(), sheet_name);
    Ok(table)
}

// The workbook handle is dropped before this returns, on success or error
fn read_range(
    path: &Path,
    sheet_name: &str,
    kind: WorkbookKind,
) -> std::result::Result<Range<Data>, calamine::Error> {
    match kind {
        WorkbookKind::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook(path)?;
            Ok(workbook.worksheet_range(sheet_name)?)
        }
        WorkbookKind::Xls => {
            let mut workbook: Xls<_> = open_workbook(path)?;
            Ok(workbook.worksheet_range(sheet_name)?)
        }
    }
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| CellValue::from(cell).coerce_text().unwrap_or_default())
            .collect(),
        None => return Table::default(),
    };

    let body = rows
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect();

    Table::new(columns, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_yields_empty_table() {
        let range: Range<Data> = Range::empty();
        let table = table_from_range(&range);
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn header_row_becomes_columns() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Title".into()));
        range.set_value((0, 1), Data::String("HTML".into()));
        range.set_value((1, 0), Data::String("Card".into()));
        range.set_value((1, 1), Data::String("<div></div>".into()));
        range.set_value((2, 1), Data::String("<p></p>".into()));

        let table = table_from_range(&range);
        assert_eq!(table.columns(), ["Title", "HTML"]);
        assert_eq!(table.len(), 2);

        let last: Vec<&[CellValue]> = table.rows().collect();
        assert_eq!(last[1][0], CellValue::Absent);
        assert_eq!(last[1][1], CellValue::Text("<p></p>".into()));
    }
}
