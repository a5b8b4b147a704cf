//! Xlsx report sink
//!
//! Writes the report as a single-sheet .xlsx workbook: header labels in row
//! 1, one record per following row.

use crate::output::traits::{OutputResult, ReportSink};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Sink producing a single-sheet .xlsx workbook
#[derive(Debug, Default)]
pub struct XlsxSink;

impl XlsxSink {
    /// Creates a new xlsx sink
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for XlsxSink {
    fn write(&self, header: &[&str], rows: &[Vec<String>], path: &Path) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, label) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *label)?;
        }

        for (row_idx, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                worksheet.write_string(row_idx as u32 + 1, col as u16, value)?;
            }
        }

        workbook.save(path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::HEADER;

    #[test]
    fn test_writes_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let rows = vec![
            vec![
                "Audi A4".to_string(),
                "1 500 000 ₽".to_string(),
                "2018".to_string(),
                "85 000 км".to_string(),
                "audi-a4".to_string(),
                "/cars/used/sale/audi-a4/1115/".to_string(),
            ],
            vec![
                "BMW 320i".to_string(),
                String::new(),
                String::new(),
                String::new(),
                "bmw-3er".to_string(),
                "/cars/used/sale/bmw-3er/2226/".to_string(),
            ],
        ];

        XlsxSink::new().write(&HEADER, &rows, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_empty_rows_still_writes_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        XlsxSink::new().write(&HEADER, &[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_parent_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/report.xlsx");

        assert!(XlsxSink::new().write(&HEADER, &[], &path).is_err());
    }
}
