//! Colored CLI display utilities for memory and keyword output.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::keywords::ExtractedQuery;
use crate::memory::{DiscoveredContext, MemoryFileRecord, RefreshSummary, Tier};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Maximum length for a term list line outside raw mode.
const DEFAULT_MAX_LEN: usize = 120;

/// Truncate a string to a maximum number of characters, adding an ellipsis
/// if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize, raw_mode: bool) -> String {
    if raw_mode || s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return "...".to_string();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

/// Format a list of terms as a comma-separated, quoted line.
#[must_use]
pub fn format_terms(terms: &[String], raw_mode: bool) -> String {
    let joined = terms
        .iter()
        .map(|term| format!("{term:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    truncate(&joined, DEFAULT_MAX_LEN, raw_mode)
}

/// Print the outcome of a refresh.
pub fn print_refresh_summary(summary: &RefreshSummary) {
    println!(
        "{} {} files={} chars={} (global={}, extension={}, project={})",
        timestamp().dimmed(),
        "[MEMORY]".blue().bold(),
        summary.file_count.cyan(),
        summary.stats.total_chars.cyan(),
        summary.stats.global.files,
        summary.stats.extension.files,
        summary.stats.project.files,
    );
    let _ = io::stdout().flush();
}

/// Print one tier buffer under a colored header.
pub fn print_tier(tier: Tier, content: &str) {
    let header = format!("[{}]", tier.as_str().to_uppercase());
    if content.is_empty() {
        println!("{} {}", header.green().bold(), "(empty)".dimmed());
    } else {
        println!("{}\n{}", header.green().bold(), content);
    }
    let _ = io::stdout().flush();
}

/// Print per-file details.
pub fn print_records(records: &[MemoryFileRecord]) {
    for record in records {
        println!(
            "  {} {} {}",
            format!("{:<9}", record.tier.as_str()).magenta(),
            format!("{:>7}", record.char_count).dimmed(),
            record.path.display()
        );
    }
    let _ = io::stdout().flush();
}

/// Print the result of a just-in-time discovery.
pub fn print_discovered(accessed: &Path, discovered: &DiscoveredContext) {
    let ts = timestamp();
    if discovered.is_empty() {
        println!(
            "{} {} {} {}",
            ts.dimmed(),
            "[JIT]".yellow().bold(),
            accessed.display(),
            "no new memory".dimmed()
        );
    } else {
        println!(
            "{} {} {} +{} file(s)\n{}",
            ts.dimmed(),
            "[JIT]".yellow().bold(),
            accessed.display(),
            discovered.files.len().cyan(),
            discovered.content
        );
    }
    let _ = io::stdout().flush();
}

/// Print an extracted query.
pub fn print_keywords(query: &ExtractedQuery, raw_mode: bool) {
    let rows = [
        ("quoted", &query.quoted_strings),
        ("paths", &query.file_paths),
        ("identifiers", &query.identifiers),
        ("terms", &query.general_terms),
    ];
    for (label, terms) in rows {
        println!(
            "{} {}",
            format!("{label:>11}:").dimmed(),
            format_terms(terms, raw_mode)
        );
    }
    println!(
        "{} {}",
        format!("{:>11}:", "keywords").cyan().bold(),
        format_terms(&query.keywords, raw_mode)
    );
    let _ = io::stdout().flush();
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {} {}", timestamp().dimmed(), "[ERROR]".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10, false), "hello");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5, false), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8, false), "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 3, false), "...");
        assert_eq!(truncate("hello", 0, false), "...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ééééé", 4, false), "é...");
    }

    #[test]
    fn test_truncate_raw_mode_no_truncation() {
        let long_string = "a".repeat(200);
        assert_eq!(truncate(&long_string, 10, true), long_string);
    }

    #[test]
    fn test_format_terms() {
        let terms = vec!["login button".to_string(), "color".to_string()];
        assert_eq!(format_terms(&terms, false), r#""login button", "color""#);
        assert_eq!(format_terms(&[], false), "");
    }

    #[test]
    fn test_format_terms_truncates_long_lists() {
        let terms: Vec<String> = (0..100).map(|i| format!("term{i}")).collect();
        let formatted = format_terms(&terms, false);
        assert!(formatted.ends_with("..."));
        assert_eq!(formatted.chars().count(), DEFAULT_MAX_LEN);
        assert!(!format_terms(&terms, true).ends_with("..."));
    }
}
