//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::ClassificationMode;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SHEET: Emoji<'_, '_> = Emoji("📄 ", "");
pub static BOOK: Emoji<'_, '_> = Emoji("📚 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SCALES: Emoji<'_, '_> = Emoji("⚖️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("cdecount").cyan().bold(),
        style("Common data element tier counts per study").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Run configuration shown before the pipeline starts
pub struct ConfigCard<'a> {
    pub input: &'a Path,
    pub sheet_name: &'a str,
    pub output: &'a Path,
    pub tier1: &'a Path,
    pub tier2: &'a Path,
    pub mode: ClassificationMode,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard) {
    let box_width = 60;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!("    │ {:<width$}│", style("⚙️  Configuration").cyan().bold(), width = box_width - 3);
    println!("    ├{}┤", line);
    println!("    │  {}Input:  {:<46}│", FOLDER, truncate_path(card.input, 45));
    println!("    │  {}Sheet:  {:<46}│", SHEET, truncate_string(card.sheet_name, 45));
    println!("    │  {}Output: {:<46}│", SAVE, truncate_path(card.output, 45));
    println!("    ├{}┤", line);
    println!("    │  {}Tier 1: {:<46}│", BOOK, truncate_path(card.tier1, 45));
    println!("    │  {}Tier 2: {:<46}│", BOOK, truncate_path(card.tier2, 45));
    println!(
        "    │  {}Mode:   {:<46}│",
        SCALES,
        style(card.mode.to_string()).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message
pub fn print_completion(output: &Path) {
    println!();
    println!(
        "    {} {} {}",
        ROCKET,
        style("Counts written to").green().bold(),
        style(output.display()).cyan()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!("      Found {} {}", style(count).yellow().bold(), description);
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Keep the tail of `s` when it is longer than `max_len` characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
