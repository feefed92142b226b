//! Quoted string extraction.

use std::ops::Range;

/// Byte ranges of quoted spans, quotes included.
///
/// Double quotes always pair. A single quote opens only after a
/// non-alphanumeric character and closes only before one, so apostrophes
/// inside words never start a span. Runs in linear time: each quote kind
/// stops being searched once an opener finds no closer.
#[must_use]
pub fn quoted_spans(query: &str) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = query.char_indices().collect();
    let is_word = |idx: usize| chars.get(idx).is_some_and(|(_, c)| c.is_alphanumeric());

    let mut spans = Vec::new();
    let mut double_open = true;
    let mut single_open = true;
    let mut i = 0;

    while i < chars.len() {
        let (start, quote) = chars[i];
        let opens = match quote {
            '"' => double_open,
            '\'' => single_open && (i == 0 || !is_word(i - 1)),
            _ => false,
        };
        if !opens {
            i += 1;
            continue;
        }

        let close = (i + 1..chars.len())
            .find(|&j| chars[j].1 == quote && (quote == '"' || !is_word(j + 1)));
        match close {
            Some(j) => {
                spans.push(start..chars[j].0 + quote.len_utf8());
                i = j + 1;
            }
            None => {
                if quote == '"' {
                    double_open = false;
                } else {
                    single_open = false;
                }
                i += 1;
            }
        }
    }

    spans
}

/// Trimmed, non-empty contents of every quoted span.
#[must_use]
pub fn extract_quoted(query: &str) -> Vec<String> {
    quoted_spans(query)
        .into_iter()
        .map(|span| query[span.start + 1..span.end - 1].trim())
        .filter(|inner| !inner.is_empty())
        .map(String::from)
        .collect()
}

/// The query with every quoted span replaced by a space.
#[must_use]
pub fn without_quoted(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    let mut last = 0;
    for span in quoted_spans(query) {
        out.push_str(&query[last..span.start]);
        out.push(' ');
        last = span.end;
    }
    out.push_str(&query[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_and_single_quotes() {
        assert_eq!(
            extract_quoted(r#"rename "login button" and 'submit form'"#),
            vec!["login button", "submit form"]
        );
    }

    #[test]
    fn test_contents_are_trimmed_and_empty_dropped() {
        assert_eq!(extract_quoted(r#"a "  padded  " b "" c"#), vec!["padded"]);
    }

    #[test]
    fn test_apostrophes_do_not_open_spans() {
        assert!(extract_quoted("don't touch it's config").is_empty());
        assert_eq!(extract_quoted("it's the 'auth' module"), vec!["auth"]);
    }

    #[test]
    fn test_unbalanced_quote_is_ignored() {
        assert!(extract_quoted(r#"an "unterminated quote"#).is_empty());
        assert_eq!(extract_quoted(r#""ok" then "dangling"#), vec!["ok"]);
    }

    #[test]
    fn test_nested_other_quote_kind() {
        assert_eq!(extract_quoted(r#""say 'hi' now""#), vec!["say 'hi' now"]);
    }

    #[test]
    fn test_without_quoted() {
        assert_eq!(
            without_quoted(r#"fix "login button" color"#),
            "fix   color"
        );
    }

    #[test]
    fn test_non_ascii_content() {
        assert_eq!(extract_quoted("le « x » \"café crème\""), vec!["café crème"]);
    }

    #[test]
    fn test_pathological_quote_runs() {
        let query = "'".repeat(10_000) + &"\"".repeat(10_001);
        let spans = quoted_spans(&query);
        assert!(!spans.is_empty());
        assert!(extract_quoted(&query).is_empty());
    }
}
