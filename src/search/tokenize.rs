//! Text normalization and tokenization shared by extraction and ranking.
//!
//! Deliberately simple: lowercase plus whitespace splitting. No stemming, no
//! stop words, no language detection.

use ahash::AHashSet;

/// Content keywords shorter than this many characters (inclusive) are dropped.
const MIN_CONTENT_KEYWORD_CHARS: usize = 3;

/// Splits a raw query into its distinct lowercase terms, in first-seen order.
///
/// Blank input yields no terms.
pub fn query_terms(query: &str) -> Vec<String> {
    let normalized = query.trim().to_lowercase();
    let mut seen = AHashSet::new();
    normalized
        .split_whitespace()
        .filter(|term| seen.insert(*term))
        .map(str::to_string)
        .collect()
}

/// Lowercase whitespace-separated words, duplicates kept.
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Keywords for body text: like [`word_tokens`] but only words longer than three characters.
pub(crate) fn content_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_CONTENT_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Lowercases, turns each whitespace run into one hyphen and keeps the first `max_chars` characters.
pub(crate) fn slugify(text: &str, max_chars: usize) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(max_chars)
        .collect()
}

/// Keeps the first `max_chars` characters, appending `...` when anything was cut.
pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

/// Text up to the first `.`, `!` or `?`, trimmed.
pub(crate) fn first_sentence(text: &str) -> &str {
    text.split(['.', '!', '?']).next().unwrap_or("").trim()
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub(crate) fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
