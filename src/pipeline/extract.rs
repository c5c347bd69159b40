//! Per-study variable extraction
//!
//! Each input row contributes a comma-separated variable list to its study.
//! Studies appearing on several rows get the union of all their lists.

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, warn};

use super::error::CdeError;

/// Default name of the study identifier column
pub const DEFAULT_STUDY_COLUMN: &str = "dbGaP ID";

/// Default name of the free-text variable list column
pub const DEFAULT_VARIABLES_COLUMN: &str = "Variables";

/// Distinct variables per study, in first-encountered study order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyVariables {
    order: Vec<String>,
    variables: HashMap<String, BTreeSet<String>>,
}

impl StudyVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union one row's variable list into its study.
    ///
    /// A `None` list still registers the study, so it is reported with zero counts.
    pub fn add_row(&mut self, study_id: &str, variable_text: Option<&str>) {
        if !self.variables.contains_key(study_id) {
            self.order.push(study_id.to_string());
        }
        let set = self.variables.entry(study_id.to_string()).or_default();
        if let Some(text) = variable_text {
            set.extend(parse_variable_list(text));
        }
    }

    pub fn get(&self, study_id: &str) -> Option<&BTreeSet<String>> {
        self.variables.get(study_id)
    }

    /// Iterate studies in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.order
            .iter()
            .filter_map(|id| self.variables.get(id).map(|vars| (id.as_str(), vars)))
    }

    pub fn study_ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Split a comma-separated variable list into trimmed, distinct tokens.
///
/// Empty tokens are kept as `""`, so `""` itself yields `{""}`.
pub fn parse_variable_list(text: &str) -> BTreeSet<String> {
    text.split(',').map(|token| token.trim().to_string()).collect()
}

/// Collect per-study variable sets from the study table.
///
/// Rows with a null study id are skipped.
pub fn extract_study_variables(
    df: &DataFrame,
    study_column: &str,
    variables_column: &str,
) -> Result<StudyVariables> {
    let study_column = string_column(df, study_column)?;
    let variables_column = string_column(df, variables_column)?;
    let study_ids = study_column.as_materialized_series().str()?;
    let variable_lists = variables_column.as_materialized_series().str()?;

    let mut studies = StudyVariables::new();
    let mut skipped = 0usize;

    for (row, (study_id, variable_text)) in study_ids.iter().zip(variable_lists.iter()).enumerate() {
        match study_id {
            Some(id) => studies.add_row(id, variable_text),
            None => {
                warn!(row, "skipping row with empty study id");
                skipped += 1;
            }
        }
    }

    debug!(studies = studies.len(), skipped, "extracted study variables");

    Ok(studies)
}

/// Fetch a column by name and cast it to strings.
fn string_column(df: &DataFrame, name: &str) -> Result<Column> {
    let column = df.column(name).map_err(|_| CdeError::MissingColumn {
        column: name.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })?;

    Ok(column.cast(&DataType::String)?)
}
