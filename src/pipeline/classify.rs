//! Tier classification of study variables
//!
//! A variable is:
//! - **Tier 1** when it is a Tier 1 reference name AND carries the `nih_` prefix
//! - **Tier 2** when it is a Tier 2 reference name
//! - **Other** when it satisfies neither of the above
//!
//! In [`ClassificationMode::Independent`] each tier is its own predicate over
//! the full variable set, so a `nih_` name listed in both references is
//! reported as Tier 1 and Tier 2. [`ClassificationMode::Exclusive`] assigns
//! Tier 1 first, Tier 2 from the remainder, and Other from what is left.

use std::collections::BTreeSet;

use serde::Serialize;

use super::extract::StudyVariables;
use super::reference::ReferenceSets;

/// Study-side naming convention required for a Tier 1 hit
pub const TIER1_PREFIX: &str = "nih_";

/// Separator used when listing tier members in reports
pub const LIST_SEPARATOR: &str = ", ";

/// How overlapping tier predicates are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    /// Each tier is tested independently; tiers may overlap
    #[default]
    Independent,
    /// Tier 1, then Tier 2, then Other; tiers always partition the variables
    Exclusive,
}

impl std::fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationMode::Independent => write!(f, "independent"),
            ClassificationMode::Exclusive => write!(f, "exclusive"),
        }
    }
}

impl std::str::FromStr for ClassificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "independent" => Ok(ClassificationMode::Independent),
            "exclusive" => Ok(ClassificationMode::Exclusive),
            _ => Err(format!(
                "Unknown classification mode: '{}'. Use 'independent' or 'exclusive'.",
                s
            )),
        }
    }
}

/// Tier sets for one study. Members are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierClassification {
    pub tier1: BTreeSet<String>,
    pub tier2: BTreeSet<String>,
    pub other: BTreeSet<String>,
}

impl TierClassification {
    pub fn tier1_count(&self) -> usize {
        self.tier1.len()
    }

    pub fn tier2_count(&self) -> usize {
        self.tier2.len()
    }

    pub fn other_count(&self) -> usize {
        self.other.len()
    }

    pub fn tier1_list(&self) -> String {
        join_variables(&self.tier1)
    }

    pub fn tier2_list(&self) -> String {
        join_variables(&self.tier2)
    }

    pub fn other_list(&self) -> String {
        join_variables(&self.other)
    }
}

/// Classification of a single study
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyClassification {
    pub study_id: String,
    #[serde(flatten)]
    pub tiers: TierClassification,
}

/// Tier 1 predicate: listed in the Tier 1 reference and `nih_`-prefixed.
pub fn is_tier1(variable: &str, references: &ReferenceSets) -> bool {
    variable.starts_with(TIER1_PREFIX) && references.tier1.contains(variable)
}

/// Tier 2 predicate: listed in the Tier 2 reference.
pub fn is_tier2(variable: &str, references: &ReferenceSets) -> bool {
    references.tier2.contains(variable)
}

/// Split one study's variables into tiers.
pub fn classify_variables(
    variables: &BTreeSet<String>,
    references: &ReferenceSets,
    mode: ClassificationMode,
) -> TierClassification {
    let mut tiers = TierClassification::default();

    for variable in variables {
        let tier1 = is_tier1(variable, references);
        let tier2 = is_tier2(variable, references);

        if tier1 {
            tiers.tier1.insert(variable.clone());
        }
        if tier2 && (mode == ClassificationMode::Independent || !tier1) {
            tiers.tier2.insert(variable.clone());
        }
        if !tier1 && !tier2 {
            tiers.other.insert(variable.clone());
        }
    }

    tiers
}

/// Classify every study, preserving first-encountered study order.
pub fn classify_studies(
    studies: &StudyVariables,
    references: &ReferenceSets,
    mode: ClassificationMode,
) -> Vec<StudyClassification> {
    studies
        .iter()
        .map(|(study_id, variables)| StudyClassification {
            study_id: study_id.to_string(),
            tiers: classify_variables(variables, references, mode),
        })
        .collect()
}

/// Join set members with `", "` in sorted order.
pub fn join_variables(variables: &BTreeSet<String>) -> String {
    variables
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
