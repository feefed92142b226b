//! General term extraction.

use std::collections::HashSet;

use super::paths::without_paths;
use super::quoted::without_quoted;
use super::stopwords::is_stop_word;

/// Minimum length (in characters) a general term must exceed.
const MIN_TERM_LEN: usize = 2;

/// Lowercased free-text terms left after quotes and paths are removed.
///
/// Punctuation other than `_` becomes whitespace; short tokens and stop
/// words are dropped; duplicates keep their first position.
#[must_use]
pub fn extract_general_terms(query: &str) -> Vec<String> {
    let remaining = without_paths(&without_quoted(query));
    let cleaned: String = remaining
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|term| term.chars().count() > MIN_TERM_LEN && !is_stop_word(term))
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_removed() {
        let terms = extract_general_terms("I want to add a new feature");
        assert_eq!(terms, vec!["feature"]);
    }

    #[test]
    fn test_quotes_and_paths_removed() {
        let terms = extract_general_terms(r#"Fix the "login button" color in src/components/AuthForm.tsx"#);
        assert_eq!(terms, vec!["color"]);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let terms = extract_general_terms("retry-logic, timeout; backoff!!! (jitter)");
        assert_eq!(terms, vec!["retry", "logic", "timeout", "backoff", "jitter"]);
    }

    #[test]
    fn test_lowercased_and_deduplicated() {
        let terms = extract_general_terms("Cache cache CACHE eviction");
        assert_eq!(terms, vec!["cache", "eviction"]);
    }

    #[test]
    fn test_non_ascii_terms_kept() {
        let terms = extract_general_terms("résumé parsing für Übersetzung");
        assert_eq!(terms, vec!["résumé", "parsing", "für", "übersetzung"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(extract_general_terms("").is_empty());
        assert!(extract_general_terms(&"?!.,".repeat(10_000)).is_empty());
    }
}
