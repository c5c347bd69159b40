//! Classification summary for the terminal

use std::collections::BTreeSet;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::{ClassificationMode, StudyClassification};

/// Totals across all studies
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub mode: ClassificationMode,
    pub studies: usize,
    /// Studies that produced no variables at all
    pub empty_studies: usize,
    /// Sum of per-study Tier 1 counts
    pub tier1_total: usize,
    pub tier2_total: usize,
    pub other_total: usize,
    /// Distinct Tier 1 variables across all studies
    pub tier1_distinct: usize,
    pub tier2_distinct: usize,
    pub other_distinct: usize,
}

impl ClassificationSummary {
    pub fn from_studies(studies: &[StudyClassification], mode: ClassificationMode) -> Self {
        let mut tier1 = BTreeSet::new();
        let mut tier2 = BTreeSet::new();
        let mut other = BTreeSet::new();
        let mut summary = Self {
            mode,
            studies: studies.len(),
            ..Default::default()
        };

        for study in studies {
            let tiers = &study.tiers;
            summary.tier1_total += tiers.tier1_count();
            summary.tier2_total += tiers.tier2_count();
            summary.other_total += tiers.other_count();
            if tiers.tier1.is_empty() && tiers.tier2.is_empty() && tiers.other.is_empty() {
                summary.empty_studies += 1;
            }
            tier1.extend(tiers.tier1.iter());
            tier2.extend(tiers.tier2.iter());
            other.extend(tiers.other.iter());
        }

        summary.tier1_distinct = tier1.len();
        summary.tier2_distinct = tier2.len();
        summary.other_distinct = other.len();
        summary
    }

    /// Share of study variables that hit Tier 1 or Tier 2, in percent
    pub fn coverage_pct(&self) -> f64 {
        let total = self.tier1_total + self.tier2_total + self.other_total;
        if total == 0 {
            0.0
        } else {
            ((self.tier1_total + self.tier2_total) as f64 / total as f64) * 100.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLASSIFICATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new("Distinct").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Studies"),
            Cell::new(self.studies),
            Cell::new(""),
        ]);

        if self.empty_studies > 0 {
            table.add_row(vec![
                Cell::new("⚠️  Studies without variables"),
                Cell::new(self.empty_studies).fg(Color::Yellow),
                Cell::new(""),
            ]);
        }

        table.add_row(vec![
            Cell::new("🥇 Tier 1 CDEs"),
            Cell::new(self.tier1_total).fg(Color::Green),
            Cell::new(self.tier1_distinct),
        ]);

        table.add_row(vec![
            Cell::new("🥈 Tier 2 CDEs"),
            Cell::new(self.tier2_total).fg(Color::Cyan),
            Cell::new(self.tier2_distinct),
        ]);

        table.add_row(vec![
            Cell::new("📦 Other DEs"),
            Cell::new(self.other_total).fg(if self.other_total == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
            Cell::new(self.other_distinct),
        ]);

        let coverage = self.coverage_pct();
        let color = if coverage > 50.0 {
            Color::Green
        } else if coverage > 20.0 {
            Color::Yellow
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new("📈 CDE Coverage"),
            Cell::new(format!("{:.1}%", coverage))
                .fg(color)
                .add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} {}",
            style("Mode:").dim(),
            style(self.mode).yellow()
        );
    }
}
