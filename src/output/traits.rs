//! Report sink trait and types
//!
//! The sink is a seam: the scrape pipeline hands over a header row and
//! row-major data, and the implementation decides the file format. Tests
//! substitute a recording sink to assert that failed runs never write.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report sinks
///
/// A sink serializes one header row plus row-major data to a single tabular
/// file at the given path. Row order and column order are preserved exactly.
pub trait ReportSink {
    /// Writes the report
    ///
    /// # Arguments
    ///
    /// * `header` - Column labels for row 1
    /// * `rows` - One record per row, fields in header order
    /// * `path` - Target file, parent directory must exist
    fn write(&self, header: &[&str], rows: &[Vec<String>], path: &Path) -> OutputResult<()>;
}
