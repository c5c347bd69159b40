//! Tier 1 / Tier 2 reference dictionary loading
//!
//! Both dictionaries are flattened into plain membership sets. Category names
//! and the domain → codomain pairing of Tier 1 rules are discarded.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use tracing::debug;

use super::error::CdeError;

/// Tier 1 document: category → (domain variable → codomain variable)
type Tier1Document = BTreeMap<String, BTreeMap<String, String>>;

/// Tier 2 document: category → list of variable names
type Tier2Document = BTreeMap<String, Vec<String>>;

/// Flattened reference sets used by the classifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSets {
    pub tier1: HashSet<String>,
    pub tier2: HashSet<String>,
}

impl ReferenceSets {
    pub fn new<I, J, S, T>(tier1: I, tier2: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            tier1: tier1.into_iter().map(Into::into).collect(),
            tier2: tier2.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse a Tier 1 mapping document into the union of all domain and codomain names.
pub fn parse_tier1_reference(json: &str) -> serde_json::Result<HashSet<String>> {
    let document: Tier1Document = serde_json::from_str(json)?;

    let names = document
        .into_values()
        .flat_map(|rules| rules.into_iter().flat_map(|(domain, codomain)| [domain, codomain]))
        .collect();

    Ok(names)
}

/// Parse a Tier 2 list document into the union of all listed names.
pub fn parse_tier2_reference(json: &str) -> serde_json::Result<HashSet<String>> {
    let document: Tier2Document = serde_json::from_str(json)?;
    Ok(document.into_values().flatten().collect())
}

/// Load the Tier 1 reference set from a JSON file
pub fn load_tier1_reference(path: &Path) -> Result<HashSet<String>, CdeError> {
    let json = read_document(path)?;
    let names = parse_tier1_reference(&json).map_err(|source| CdeError::MalformedReference {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), names = names.len(), "loaded tier 1 reference");
    Ok(names)
}

/// Load the Tier 2 reference set from a JSON file
pub fn load_tier2_reference(path: &Path) -> Result<HashSet<String>, CdeError> {
    let json = read_document(path)?;
    let names = parse_tier2_reference(&json).map_err(|source| CdeError::MalformedReference {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), names = names.len(), "loaded tier 2 reference");
    Ok(names)
}

/// Load both reference sets. Fails on the first unreadable or malformed document.
pub fn load_references(tier1_path: &Path, tier2_path: &Path) -> Result<ReferenceSets, CdeError> {
    Ok(ReferenceSets {
        tier1: load_tier1_reference(tier1_path)?,
        tier2: load_tier2_reference(tier2_path)?,
    })
}

fn read_document(path: &Path) -> Result<String, CdeError> {
    std::fs::read_to_string(path).map_err(|source| CdeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
