#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::{Path, PathBuf};
use studio_components::{ConfigOverrides, Converter};

/// A fixture cell; `Blank` leaves the cell unwritten
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// Year, month, day written as a date-formatted cell
    Date(u16, u8, u8),
    Blank,
}

pub use Cell::{Blank, Date, Number, Text};

pub const HEADERS: [&str; 4] = ["Title", "HTML", "CSS", "Reference"];

/// Write a single-sheet workbook with a header row followed by `rows`
pub fn write_workbook(path: &Path, sheet: &str, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, col, *s).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, col, *n).unwrap();
                }
                Cell::Date(year, month, day) => {
                    let date = ExcelDateTime::from_ymd(*year, *month, *day).unwrap();
                    worksheet
                        .write_datetime_with_format(r, col, &date, &date_format)
                        .unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Converter reading `source` and writing `components.json` next to it
pub fn converter_for(source: &Path) -> Converter {
    Converter::with_overrides(ConfigOverrides {
        source_path: Some(source.to_path_buf()),
        output_path: Some(output_path_for(source)),
        ..Default::default()
    })
    .unwrap()
}

pub fn output_path_for(source: &Path) -> PathBuf {
    source.with_file_name("out").join("components.json")
}
