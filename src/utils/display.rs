// file: src/utils/display.rs
// description: colored terminal output helpers and preview truncation
// reference: https://docs.rs/colored

use colored::*;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn thin_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

pub fn banner(title: &str) -> String {
    format!("{}\n{}\n{}", rule(), title.bold(), rule())
}

pub fn step(number: usize, msg: &str) -> String {
    format!("{} {}", format!("{}.", number).cyan().bold(), msg)
}

pub fn ok(msg: &str) -> String {
    format!("   {} {}", "✓".green().bold(), msg.green())
}

pub fn fail(msg: &str) -> String {
    format!("   {} {}", "✗".red().bold(), msg.red())
}

pub fn warn(msg: &str) -> String {
    format!("   {} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn hint(msg: &str) -> String {
    format!("   {} {}", "→".blue().bold(), msg)
}

/// Truncate to at most `max_chars` characters, appending an ellipsis
/// when anything was cut. Counts chars, not bytes: chunk text is not
/// ASCII-only (currency signs, accented carrier names).
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
