//! Stop words dropped from general query terms.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English words plus filler verbs typical of coding requests.
pub const STOP_WORDS: &[&str] = &[
    // English
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "done", "down", "during", "each",
    "else", "even", "ever", "every", "few", "for", "from", "further", "get", "gets", "got", "had",
    "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "however", "i",
    "if", "in", "into", "is", "it", "its", "itself", "just", "let", "like", "lot", "many", "may",
    "me", "might", "more", "most", "much", "must", "my", "myself", "need", "needs", "new", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "please", "really", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "thing", "things",
    "this", "those", "through", "to", "too", "under", "until", "up", "upon", "us", "very", "via",
    "want", "wants", "was", "way", "we", "well", "were", "what", "when", "where", "whether",
    "which", "while", "who", "whom", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself",
    // Coding filler
    "add", "adding", "change", "check", "create", "currently", "fix", "fixing", "help", "implement",
    "implementing", "issue", "look", "make", "modify", "problem", "remove", "show", "support",
    "try", "update", "use", "using", "work", "working", "write",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Check whether a word is a stop word, ignoring case.
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    if word.chars().any(char::is_uppercase) {
        STOP_WORD_SET.contains(word.to_lowercase().as_str())
    } else {
        STOP_WORD_SET.contains(word)
    }
}
