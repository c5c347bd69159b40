//! cdecount: CDE Tier Counting CLI Tool
//!
//! Reads a study/variable table, classifies each study's variables into
//! Tier 1, Tier 2 and Other CDEs, and writes per-study counts to CSV.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cdecount::cli::Cli;
use cdecount::pipeline::{
    classify_studies, extract_study_variables, load_references, load_variable_table,
};
use cdecount::report::{
    build_count_rows, commit_all, stage_classification_json, stage_counts_csv,
    ClassificationSummary, ExportParams,
};
use cdecount::utils::{
    create_spinner, finish_with_error, finish_with_success, init_logging, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_success,
    ConfigCard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let show = !cli.quiet;
    let tier1_path = cli.tier1_path();
    let tier2_path = cli.tier2_path();

    if show {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&ConfigCard {
            input: &cli.input,
            sheet_name: &cli.sheet_name,
            output: &cli.output,
            tier1: &tier1_path,
            tier2: &tier2_path,
            mode: cli.mode,
        });
    }

    // Step 1: Reference dictionaries
    if show {
        print_step_header(1, "Load Reference Dictionaries");
    }
    let spinner = create_spinner("Reading Tier 1 and Tier 2 references...", show);
    let references = load_references(&tier1_path, &tier2_path)
        .inspect_err(|_| finish_with_error(&spinner))?;
    finish_with_success(&spinner, "References loaded");
    if show {
        print_count("Tier 1 reference name(s)", references.tier1.len());
        print_count("Tier 2 reference name(s)", references.tier2.len());
    }

    // Step 2: Study table
    if show {
        print_step_header(2, "Extract Study Variables");
    }
    let spinner = create_spinner("Reading study table...", show);
    let table = load_variable_table(&cli.input, &cli.sheet_name)
        .and_then(|df| extract_study_variables(&df, &cli.study_column, &cli.variables_column))
        .with_context(|| format!("Failed to extract study variables from {}", cli.input.display()))
        .inspect_err(|_| finish_with_error(&spinner))?;
    finish_with_success(&spinner, "Study table loaded");
    if show {
        print_count("study id(s)", table.len());
    }
    info!(studies = table.len(), "extracted studies");

    // Step 3: Classification
    if show {
        print_step_header(3, "Classify Variables");
    }
    let classifications = classify_studies(&table, &references, cli.mode);
    let summary = ClassificationSummary::from_studies(&classifications, cli.mode);
    if show {
        print_success(&format!("Classified {} studies ({} mode)", summary.studies, cli.mode));
        if summary.empty_studies > 0 {
            print_info(&format!(
                "{} study id(s) have no variables and are reported with zero counts",
                summary.empty_studies
            ));
        }
    }

    // Step 4: Output
    if show {
        print_step_header(4, "Save Results");
    }
    let spinner = create_spinner("Writing counts...", show);
    let rows = build_count_rows(&classifications);
    let mut staged =
        vec![stage_counts_csv(&rows, &cli.output).inspect_err(|_| finish_with_error(&spinner))?];

    if let Some(json_path) = &cli.json {
        let params = ExportParams {
            input_file: &cli.input,
            sheet_name: &cli.sheet_name,
            tier1_reference: &tier1_path,
            tier2_reference: &tier2_path,
            mode: cli.mode,
        };
        staged.push(
            stage_classification_json(&classifications, &summary, json_path, &params)
                .inspect_err(|_| finish_with_error(&spinner))?,
        );
    }

    // Nothing reaches its target path until every report is written
    commit_all(staged).inspect_err(|_| finish_with_error(&spinner))?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.output.display()));
    if show {
        if let Some(json_path) = &cli.json {
            print_success(&format!("Classification exported to {}", json_path.display()));
        }
        summary.display();
        print_completion(&cli.output);
    }

    Ok(())
}
