//! Export module for splitledger
//!
//! Writes analyses in machine-readable formats:
//! - JSON: the front-end contract, pretty or compact
//! - YAML: human-readable, with a comment header
//! - CSV: one row per line item, spreadsheet-compatible

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_csv, CsvRow, CsvRows, RowKind};
pub use self::json::export_json;
pub use self::yaml::export_yaml;

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::LedgerResult;
use crate::storage::write_atomic;

/// File formats an analysis can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

/// Write `report` in `format` to any writer
pub fn write_report<T, W>(report: &T, title: &str, format: ExportFormat, writer: W) -> LedgerResult<()>
where
    T: Serialize + CsvRows,
    W: Write,
{
    match format {
        ExportFormat::Json => export_json(report, writer, false),
        ExportFormat::Yaml => export_yaml(report, title, writer),
        ExportFormat::Csv => export_csv(report, writer),
    }
}

/// Write `report` to `path`, replacing any existing file atomically
pub fn export_to_path<T>(report: &T, title: &str, format: ExportFormat, path: &Path) -> LedgerResult<()>
where
    T: Serialize + CsvRows,
{
    write_atomic(path, |writer| write_report(report, title, format, writer))?;
    tracing::info!(path = %path.display(), format = format.extension(), "exported {}", title);
    Ok(())
}
