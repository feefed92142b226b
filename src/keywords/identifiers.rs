//! Code identifier extraction.
//!
//! Recognizes camelCase / PascalCase and snake_case / kebab-case tokens and
//! keeps both the whole identifier and its meaningful components.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::is_stop_word;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_\-]*").expect("valid token pattern"));

static DELIMITED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*(?:[_-][A-Za-z0-9]+)+$").expect("valid delimited pattern")
});

/// Split a token at case boundaries.
///
/// `parseHTTPResponse` becomes `parse`, `HTTP`, `Response`.
#[must_use]
pub fn split_case(token: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = token.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let prev = chars[i - 1].1;
        let cur = chars[i].1;
        let next_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());
        let boundary = (cur.is_uppercase() && (prev.is_lowercase() || prev.is_ascii_digit()))
            || (cur.is_uppercase() && prev.is_uppercase() && next_lower);
        if boundary {
            parts.push(&token[start..chars[i].0]);
            start = chars[i].0;
        }
    }
    if start < token.len() {
        parts.push(&token[start..]);
    }
    parts
}

/// Whether a token is camelCase or PascalCase: mixed case with at least two
/// case-delimited segments.
#[must_use]
pub fn is_camel_case(token: &str) -> bool {
    token.chars().all(char::is_alphanumeric)
        && token.chars().any(char::is_lowercase)
        && token.chars().any(char::is_uppercase)
        && split_case(token).len() >= 2
}

/// Whether a token is snake_case or kebab-case with at least two parts.
#[must_use]
pub fn is_delimited(token: &str) -> bool {
    DELIMITED.is_match(token)
}

/// Components of an identifier worth matching on their own.
fn components(identifier: &str) -> Vec<String> {
    identifier
        .split(['_', '-'])
        .flat_map(split_case)
        .map(str::to_lowercase)
        .filter(|part| part.chars().count() > 2 && !is_stop_word(part))
        .collect()
}

/// Identifiers and their components, in order of appearance.
///
/// Each recognized identifier is followed by its components. Duplicates
/// (ignoring case) are dropped.
#[must_use]
pub fn extract_identifiers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();

    for token in TOKEN.find_iter(text) {
        let token = token.as_str().trim_matches(['_', '-']);
        if !(is_camel_case(token) || is_delimited(token)) {
            continue;
        }
        for term in std::iter::once(token.to_string()).chain(components(token)) {
            if seen.insert(term.to_lowercase()) {
                identifiers.push(term);
            }
        }
    }

    identifiers
}
