//! Report output
//!
//! One run produces one file: a timestamped .xlsx report under the
//! configured output directory.

mod traits;
mod xlsx;

pub use traits::{OutputError, OutputResult, ReportSink};
pub use xlsx::XlsxSink;

use crate::config::OutputConfig;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Derives the report path from the save timestamp
///
/// Format: `<dir>/<prefix>__<MMDDYYYY>_<HHMMSS>.xlsx`, e.g.
/// `data/autoru_dump__08072026_143052.xlsx`.
pub fn report_path(config: &OutputConfig, saved_at: DateTime<Local>) -> PathBuf {
    let filename = format!(
        "{}__{}.xlsx",
        config.file_prefix,
        saved_at.format("%m%d%Y_%H%M%S")
    );
    PathBuf::from(&config.dir).join(filename)
}
