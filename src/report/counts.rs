//! Per-study CDE count table and CSV output

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::staged::StagedFile;
use crate::pipeline::StudyClassification;

pub const STUDY_ID_HEADER: &str = "Study ID";
pub const TIER1_COUNT_HEADER: &str = "Tier 1 Count";
pub const TIER1_LIST_HEADER: &str = "Tier 1 CDEs";
pub const TIER2_COUNT_HEADER: &str = "Tier 2 Count";
pub const TIER2_LIST_HEADER: &str = "Tier 2 CDEs";
pub const OTHER_COUNT_HEADER: &str = "Other Count";
pub const OTHER_LIST_HEADER: &str = "Other DEs";

/// Output columns, in order
pub const COUNT_HEADERS: [&str; 7] = [
    STUDY_ID_HEADER,
    TIER1_COUNT_HEADER,
    TIER1_LIST_HEADER,
    TIER2_COUNT_HEADER,
    TIER2_LIST_HEADER,
    OTHER_COUNT_HEADER,
    OTHER_LIST_HEADER,
];

/// One report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub study_id: String,
    pub tier1_count: u32,
    pub tier1_list: String,
    pub tier2_count: u32,
    pub tier2_list: String,
    pub other_count: u32,
    pub other_list: String,
}

impl From<&StudyClassification> for CountRow {
    fn from(study: &StudyClassification) -> Self {
        let tiers = &study.tiers;
        Self {
            study_id: study.study_id.clone(),
            tier1_count: tiers.tier1_count() as u32,
            tier1_list: tiers.tier1_list(),
            tier2_count: tiers.tier2_count() as u32,
            tier2_list: tiers.tier2_list(),
            other_count: tiers.other_count() as u32,
            other_list: tiers.other_list(),
        }
    }
}

/// Build report rows in study order
pub fn build_count_rows(studies: &[StudyClassification]) -> Vec<CountRow> {
    studies.iter().map(CountRow::from).collect()
}

/// Assemble the count table as a DataFrame with the report's column layout
pub fn counts_to_dataframe(rows: &[CountRow]) -> PolarsResult<DataFrame> {
    let study_ids: Vec<&str> = rows.iter().map(|r| r.study_id.as_str()).collect();
    let tier1_counts: Vec<u32> = rows.iter().map(|r| r.tier1_count).collect();
    let tier1_lists: Vec<&str> = rows.iter().map(|r| r.tier1_list.as_str()).collect();
    let tier2_counts: Vec<u32> = rows.iter().map(|r| r.tier2_count).collect();
    let tier2_lists: Vec<&str> = rows.iter().map(|r| r.tier2_list.as_str()).collect();
    let other_counts: Vec<u32> = rows.iter().map(|r| r.other_count).collect();
    let other_lists: Vec<&str> = rows.iter().map(|r| r.other_list.as_str()).collect();

    DataFrame::new(vec![
        Column::new(STUDY_ID_HEADER.into(), study_ids),
        Column::new(TIER1_COUNT_HEADER.into(), tier1_counts),
        Column::new(TIER1_LIST_HEADER.into(), tier1_lists),
        Column::new(TIER2_COUNT_HEADER.into(), tier2_counts),
        Column::new(TIER2_LIST_HEADER.into(), tier2_lists),
        Column::new(OTHER_COUNT_HEADER.into(), other_counts),
        Column::new(OTHER_LIST_HEADER.into(), other_lists),
    ])
}

/// Write the count table as CSV to a staged temp file.
pub fn stage_counts_csv(rows: &[CountRow], path: &Path) -> Result<StagedFile> {
    let mut df = counts_to_dataframe(rows).context("Failed to assemble count table")?;

    StagedFile::write_with(path, |file| {
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))
    })
}

/// Write the count table as CSV.
///
/// The file is written to a sibling temp path and renamed into place, so a
/// failed run never leaves a truncated report behind.
pub fn write_counts_csv(rows: &[CountRow], path: &Path) -> Result<()> {
    stage_counts_csv(rows, path)?.commit()
}
