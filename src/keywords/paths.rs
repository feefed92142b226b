//! File path extraction.

use std::collections::HashSet;

/// Characters stripped from the start of a candidate token.
const LEADING_WRAPPERS: &[char] = &['(', '[', '{', '<', '"', '\'', '`'];

/// Characters stripped from the end of a candidate token.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\'', '`',
];

/// Clean a whitespace-delimited token and return it if it looks like a path.
///
/// A path contains at least one `/` or `\` and at least one alphanumeric
/// character once wrappers and trailing sentence punctuation are removed.
#[must_use]
pub fn as_path(token: &str) -> Option<&str> {
    let cleaned = token
        .trim_start_matches(LEADING_WRAPPERS)
        .trim_end_matches(TRAILING_PUNCTUATION);
    let has_separator = cleaned.contains('/') || cleaned.contains('\\');
    let has_word = cleaned.chars().any(char::is_alphanumeric);
    (has_separator && has_word).then_some(cleaned)
}

/// Path-like tokens in order of first appearance, without duplicates.
#[must_use]
pub fn extract_file_paths(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    query
        .split_whitespace()
        .filter_map(as_path)
        .filter(|path| seen.insert(*path))
        .map(str::to_string)
        .collect()
}

/// The query with every path-like token removed.
#[must_use]
pub fn without_paths(query: &str) -> String {
    query
        .split_whitespace()
        .filter(|token| as_path(token).is_none())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_path_with_extension() {
        assert_eq!(
            extract_file_paths("Fix the color in src/components/AuthForm.tsx"),
            vec!["src/components/AuthForm.tsx"]
        );
    }

    #[test]
    fn test_strips_trailing_punctuation() {
        assert_eq!(
            extract_file_paths("Look at (lib/util.rs), then docs/guide.md."),
            vec!["lib/util.rs", "docs/guide.md"]
        );
    }

    #[test]
    fn test_directories_and_windows_separators() {
        assert_eq!(
            extract_file_paths(r"check src/api/ and C:\repo\main.c"),
            vec!["src/api/", r"C:\repo\main.c"]
        );
    }

    #[test]
    fn test_rejects_bare_separators() {
        assert!(extract_file_paths("either / or // and ///").is_empty());
        assert!(extract_file_paths("no paths here.").is_empty());
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(
            extract_file_paths("a/b.rs and a/b.rs again"),
            vec!["a/b.rs"]
        );
    }

    #[test]
    fn test_many_distinct_paths_keep_order() {
        let query: String = (0..5_000).map(|i| format!("d/f{i}.rs ")).collect();
        let paths = extract_file_paths(&query);

        assert_eq!(paths.len(), 5_000);
        assert_eq!(paths[0], "d/f0.rs");
        assert_eq!(paths[4_999], "d/f4999.rs");
    }

    #[test]
    fn test_without_paths() {
        assert_eq!(without_paths("open src/main.rs now"), "open now");
    }
}
