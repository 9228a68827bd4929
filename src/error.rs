//! Error types for the data pipeline.
//!
//! The library side uses `thiserror` enums; the application shell
//! (`main.rs`, UI handlers) wraps them with `anyhow` context.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the budget source. All of them are fatal for a
/// render: nothing downstream of the loader runs.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("sheet '{sheet}' not found (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': cannot read '{value}' as {expected}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while encoding the filtered rows for download.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to flush CSV buffer: {0}")]
    Encoding(String),
}
