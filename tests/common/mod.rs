//! Shared test utilities and fixture generators

use std::path::{Path, PathBuf};

use cdecount::pipeline::{load_variable_table, ReferenceSets};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

pub const DEFAULT_SHEET: &str = "Variable by Study and File";

/// Tier 1 rules with one category whose domain and codomain are both study-prefixed,
/// and one category mapping onto a canonical (unprefixed) name
pub const TIER1_JSON: &str = r#"{
    "demographics": { "nih_age": "nih_age_years", "nih_sex": "sex" },
    "vitals": { "nih_bmi": "bmi" }
}"#;

pub const TIER2_JSON: &str = r#"{
    "lifestyle": ["smoking_status", "alcohol_use"],
    "history": ["diabetes", "smoking_status"]
}"#;

/// Reference sets with no overlap between tiers
pub fn disjoint_references() -> ReferenceSets {
    ReferenceSets::new(
        ["nih_age", "nih_sex", "age", "sex"],
        ["diabetes", "smoking_status"],
    )
}

/// Write a two-column study table as a CSV file
pub fn create_temp_csv(rows: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("variables.csv");

    let mut df = study_dataframe(rows);
    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df).unwrap();

    (temp_dir, csv_path)
}

/// Write a two-column study table as an xlsx workbook.
/// `None` variable cells are left blank.
pub fn create_temp_xlsx(sheet_name: &str, rows: &[(&str, Option<&str>)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let xlsx_path = temp_dir.path().join("variables.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).unwrap();
    worksheet.write_string(0, 0, "dbGaP ID").unwrap();
    worksheet.write_string(0, 1, "Variables").unwrap();
    for (idx, (study_id, variables)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet.write_string(row, 0, *study_id).unwrap();
        if let Some(text) = variables {
            worksheet.write_string(row, 1, *text).unwrap();
        }
    }
    workbook.save(&xlsx_path).unwrap();

    (temp_dir, xlsx_path)
}

/// Write both reference documents into `dir`
pub fn write_references(dir: &Path, tier1: &str, tier2: &str) -> (PathBuf, PathBuf) {
    let tier1_path = dir.join("tier1.json");
    let tier2_path = dir.join("tier2.json");
    std::fs::write(&tier1_path, tier1).unwrap();
    std::fs::write(&tier2_path, tier2).unwrap();
    (tier1_path, tier2_path)
}

pub fn study_dataframe(rows: &[(&str, &str)]) -> DataFrame {
    let ids: Vec<&str> = rows.iter().map(|(id, _)| *id).collect();
    let vars: Vec<&str> = rows.iter().map(|(_, v)| *v).collect();
    df! {
        "dbGaP ID" => ids,
        "Variables" => vars,
    }
    .unwrap()
}

/// Read a written count report back as a table of strings
pub fn read_report(path: &Path) -> DataFrame {
    load_variable_table(path, "").unwrap()
}

/// Fetch one report cell as text; empty cells read back as ""
pub fn cell(df: &DataFrame, column: &str, row: usize) -> String {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .get(row)
        .unwrap_or("")
        .to_string()
}
