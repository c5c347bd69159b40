//! Error types for loading study tables and reference dictionaries.
//!
//! Every variant is fatal to a run: the pipeline either produces a complete
//! report or nothing at all.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while ingesting inputs.
#[derive(Debug, Error)]
pub enum CdeError {
    /// Input file extension is not one of the supported table formats.
    #[error("Unsupported file format: '{extension}'. Supported formats: xlsx, xlsm, xlsb, xls, ods, csv, parquet")]
    UnsupportedFormat { extension: String },

    /// The requested worksheet does not exist in the workbook.
    #[error("Sheet '{sheet}' not found in {}. Available sheets: {available:?}", .path.display())]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    /// A column the extractor depends on is absent from the table.
    #[error("Column '{column}' not found in input table. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A reference document is not valid JSON or is not shaped as expected.
    #[error("Reference document {} is malformed: {source}", .path.display())]
    MalformedReference {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error while reading an input file.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
