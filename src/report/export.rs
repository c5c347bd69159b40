//! JSON export of per-study tier classifications

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::staged::StagedFile;
use crate::pipeline::{ClassificationMode, StudyClassification};
use crate::report::ClassificationSummary;

/// Metadata about the classification run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub cdecount_version: String,
    pub input_file: String,
    pub sheet_name: String,
    pub tier1_reference: String,
    pub tier2_reference: String,
    pub mode: ClassificationMode,
}

/// A single study's tier members with counts
#[derive(Debug, Serialize)]
pub struct StudyExportEntry<'a> {
    #[serde(flatten)]
    pub classification: &'a StudyClassification,
    pub tier1_count: usize,
    pub tier2_count: usize,
    pub other_count: usize,
}

/// Complete classification export
#[derive(Debug, Serialize)]
pub struct ClassificationExport<'a> {
    pub metadata: ExportMetadata,
    pub summary: &'a ClassificationSummary,
    pub studies: Vec<StudyExportEntry<'a>>,
}

/// Parameters recorded in the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a Path,
    pub sheet_name: &'a str,
    pub tier1_reference: &'a Path,
    pub tier2_reference: &'a Path,
    pub mode: ClassificationMode,
}

/// Build the export document without writing it
pub fn build_export<'a>(
    studies: &'a [StudyClassification],
    summary: &'a ClassificationSummary,
    params: &ExportParams,
) -> ClassificationExport<'a> {
    let entries = studies
        .iter()
        .map(|study| StudyExportEntry {
            classification: study,
            tier1_count: study.tiers.tier1_count(),
            tier2_count: study.tiers.tier2_count(),
            other_count: study.tiers.other_count(),
        })
        .collect();

    ClassificationExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            cdecount_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.display().to_string(),
            sheet_name: params.sheet_name.to_string(),
            tier1_reference: params.tier1_reference.display().to_string(),
            tier2_reference: params.tier2_reference.display().to_string(),
            mode: params.mode,
        },
        summary,
        studies: entries,
    }
}

/// Serialize the export to a staged temp file beside `output_path`
pub fn stage_classification_json(
    studies: &[StudyClassification],
    summary: &ClassificationSummary,
    output_path: &Path,
    params: &ExportParams,
) -> Result<StagedFile> {
    let export = build_export(studies, summary, params);
    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize classification export")?;

    StagedFile::write_with(output_path, |file| {
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write JSON export: {}", output_path.display()))
    })
}

/// Export classification results to a pretty-printed JSON file
pub fn export_classification_json(
    studies: &[StudyClassification],
    summary: &ClassificationSummary,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    stage_classification_json(studies, summary, output_path, params)?.commit()
}
