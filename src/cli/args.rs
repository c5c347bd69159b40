//! Command-line argument definitions using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::pipeline::{ClassificationMode, DEFAULT_STUDY_COLUMN, DEFAULT_VARIABLES_COLUMN};

/// Directory holding the bundled reference dictionaries
pub const DATA_DIR: &str = "data";

/// Bundled Tier 1 mapping rules
pub const TIER1_REFERENCE_FILE: &str = "global_codebook_rules.json";

/// Bundled Tier 2 element list
pub const TIER2_REFERENCE_FILE: &str = "tier2_elements.json";

/// cdecount - A CDE counter that writes per-study tier counts to CSV
#[derive(Parser, Debug)]
#[command(name = "cdecount")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (xlsx, xls, ods, csv or parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV file path
    #[arg(short, long, default_value = "counts.csv")]
    pub output: PathBuf,

    /// Name of the worksheet to parse (workbook inputs only)
    #[arg(short, long, default_value = "Variable by Study and File")]
    pub sheet_name: String,

    /// Tier 1 CDE mapping reference (JSON).
    /// Defaults to the bundled data/global_codebook_rules.json.
    #[arg(long = "tier1-json", visible_alias = "t1")]
    pub tier1_json: Option<PathBuf>,

    /// Tier 2 CDE list reference (JSON).
    /// Defaults to the bundled data/tier2_elements.json.
    #[arg(long = "tier2-json", visible_alias = "t2")]
    pub tier2_json: Option<PathBuf>,

    /// Column holding the study identifier
    #[arg(long, default_value = DEFAULT_STUDY_COLUMN)]
    pub study_column: String,

    /// Column holding the comma-separated variable list
    #[arg(long, default_value = DEFAULT_VARIABLES_COLUMN)]
    pub variables_column: String,

    /// Tier resolution mode.
    /// "independent" (default) tests each tier on its own, so tiers may overlap;
    /// "exclusive" assigns Tier 1, then Tier 2, then Other.
    #[arg(long, default_value = "independent")]
    pub mode: ClassificationMode,

    /// Also write the full classification as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Suppress the styled terminal report
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Tier 1 reference path, falling back to the bundled file.
    pub fn tier1_path(&self) -> PathBuf {
        self.tier1_json
            .clone()
            .unwrap_or_else(|| bundled_reference_path(TIER1_REFERENCE_FILE))
    }

    /// Tier 2 reference path, falling back to the bundled file.
    pub fn tier2_path(&self) -> PathBuf {
        self.tier2_json
            .clone()
            .unwrap_or_else(|| bundled_reference_path(TIER2_REFERENCE_FILE))
    }
}

/// Locate a bundled reference file.
///
/// Looks in `data/` next to the executable first, then in the crate's own
/// `data/` directory.
pub fn bundled_reference_path(file_name: &str) -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DATA_DIR).join(file_name)));

    match beside_exe {
        Some(path) if path.exists() => path,
        _ => PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(DATA_DIR)
            .join(file_name),
    }
}
