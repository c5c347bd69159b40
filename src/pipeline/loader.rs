//! Study table loader for spreadsheet, CSV and Parquet files
//!
//! Every column is loaded as text so study identifiers such as `0001` keep
//! their leading zeros and variable lists are never type-inferred.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use tracing::debug;

use super::error::CdeError;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load the study table from a file (workbook, CSV or Parquet based on extension).
///
/// `sheet_name` selects the worksheet for workbook inputs and is ignored otherwise.
pub fn load_variable_table(path: &Path, sheet_name: &str) -> Result<DataFrame> {
    std::fs::metadata(path).map_err(|source| CdeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match extension.as_str() {
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => load_workbook_sheet(path, sheet_name)?,
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lf| lf.collect())
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .and_then(|lf| lf.collect())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => {
            return Err(CdeError::UnsupportedFormat {
                extension: extension.clone(),
            }
            .into())
        }
    };

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded study table"
    );

    Ok(df)
}

/// Read one worksheet into a DataFrame of nullable string columns.
/// The first row is the header; empty header cells become `column_<index>`.
fn load_workbook_sheet(path: &Path, sheet_name: &str) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(CdeError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            available,
        }
        .into());
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("Failed to read sheet '{}' from {}", sheet_name, path.display()))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                cell_to_string(cell)
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| format!("column_{}", idx))
            })
            .collect(),
        None => Vec::new(),
    };

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
    for cells in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(cells.get(idx).and_then(cell_to_string));
        }
    }

    let columns: Vec<Column> = header
        .into_iter()
        .zip(values)
        .map(|(name, column)| Column::new(name.into(), column))
        .collect();

    DataFrame::new(columns)
        .with_context(|| format!("Failed to build table from sheet '{}'", sheet_name))
}

/// Render a workbook cell as text. Empty and error cells are null.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(n) => Some(n.to_string()),
        // Integral floats are how spreadsheets store whole numbers
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_integral_float() {
        assert_eq!(cell_to_string(&Data::Float(42.0)), Some("42".to_string()));
    }

    #[test]
    fn test_cell_to_string_fractional_float() {
        assert_eq!(cell_to_string(&Data::Float(1.5)), Some("1.5".to_string()));
    }

    #[test]
    fn test_cell_to_string_keeps_empty_string() {
        assert_eq!(cell_to_string(&Data::String(String::new())), Some(String::new()));
    }

    #[test]
    fn test_cell_to_string_empty_is_null() {
        assert_eq!(cell_to_string(&Data::Empty), None);
    }

    #[test]
    fn test_cell_to_string_int_and_bool() {
        assert_eq!(cell_to_string(&Data::Int(7)), Some("7".to_string()));
        assert_eq!(cell_to_string(&Data::Bool(true)), Some("true".to_string()));
    }
}
