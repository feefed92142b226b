//! Query keyword extraction.
//!
//! Turns a free-text request into a priority-ranked list of search terms:
//! quoted strings first, then file paths, identifiers and general terms.
//! Every stage is a pure function; the whole pipeline is deterministic and
//! runs in time linear in the query length.

mod identifiers;
mod paths;
mod quoted;
mod stopwords;
mod terms;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use identifiers::{extract_identifiers, is_camel_case, is_delimited, split_case};
pub use paths::{as_path, extract_file_paths, without_paths};
pub use quoted::{extract_quoted, quoted_spans, without_quoted};
pub use stopwords::{is_stop_word, STOP_WORDS};
pub use terms::extract_general_terms;

/// Terms extracted from one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedQuery {
    pub quoted_strings: Vec<String>,
    pub file_paths: Vec<String>,
    pub identifiers: Vec<String>,
    pub general_terms: Vec<String>,
    /// Union of the lists above in priority order, deduplicated ignoring case.
    pub keywords: Vec<String>,
}

/// Merge term lists in priority order.
///
/// A term is kept if its lowercase form has not been seen yet and it is
/// longer than one character.
#[must_use]
pub fn merge_keywords(groups: &[&[String]]) -> Vec<String> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|group| group.iter())
        .filter(|term| term.chars().count() > 1 && seen.insert(term.to_lowercase()))
        .cloned()
        .collect()
}

/// Stateless keyword extractor, safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    /// Create a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract ranked search terms from a query. Never fails.
    #[must_use]
    pub fn extract(&self, query: &str) -> ExtractedQuery {
        let quoted_strings = extract_quoted(query);
        let file_paths = extract_file_paths(query);
        let identifiers = extract_identifiers(&without_quoted(query));
        let general_terms = extract_general_terms(query);
        let keywords = merge_keywords(&[
            quoted_strings.as_slice(),
            file_paths.as_slice(),
            identifiers.as_slice(),
            general_terms.as_slice(),
        ]);

        tracing::trace!(keywords = keywords.len(), "Extracted query keywords");
        ExtractedQuery {
            quoted_strings,
            file_paths,
            identifiers,
            general_terms,
            keywords,
        }
    }
}

/// Convenience wrapper around [`KeywordExtractor::extract`].
#[must_use]
pub fn extract_keywords(query: &str) -> ExtractedQuery {
    KeywordExtractor::new().extract(query)
}
