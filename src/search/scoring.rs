//! Search relevance weights.
//!
//! Every term is scored independently against a document and the per-term
//! scores are summed. Rules are cumulative except that an exact title match
//! replaces the title-substring bonus rather than adding to it.

use crate::types::SearchDocument;
use regex::{Regex, RegexBuilder};

/// Normalized title equals the term.
pub(crate) const EXACT_TITLE: u32 = 100;
/// Title contains the term (only when not an exact match).
pub(crate) const TITLE_SUBSTRING: u32 = 50;
/// Joined keyword list contains the term.
pub(crate) const KEYWORD: u32 = 30;
/// Content contains the term.
pub(crate) const CONTENT_SUBSTRING: u32 = 10;
/// Per title word starting with the term.
pub(crate) const TITLE_WORD_PREFIX: u32 = 25;
/// Per title word containing the term.
pub(crate) const TITLE_WORD_SUBSTRING: u32 = 15;
/// Per occurrence of the term in the title.
pub(crate) const TITLE_OCCURRENCE: u32 = 5;
/// Per occurrence of the term in the content.
pub(crate) const CONTENT_OCCURRENCE: u32 = 1;

/// A query term with its occurrence pattern compiled once per ranking pass.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    /// `None` when the escaped term still failed to compile; occurrence bonuses are then skipped.
    occurrences: Option<Regex>,
}

impl TermMatcher {
    pub fn new(term: &str) -> Self {
        let occurrences = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .inspect_err(|e| {
                tracing::debug!("Skipping occurrence scoring for term '{}': {}", term, e);
            })
            .ok();
        Self {
            term: term.to_string(),
            occurrences,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    fn count_in(&self, haystack: &str) -> u32 {
        self.occurrences
            .as_ref()
            .map_or(0, |re| re.find_iter(haystack).count() as u32)
    }
}

/// Lowercased fields of one document, computed once and reused for every term.
struct NormalizedFields {
    title: String,
    content: String,
    keywords: String,
}

impl NormalizedFields {
    fn of(doc: &SearchDocument) -> Self {
        Self {
            title: doc.title.to_lowercase(),
            content: doc.content.to_lowercase(),
            keywords: doc
                .keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Score contribution of a single term.
fn term_score(fields: &NormalizedFields, matcher: &TermMatcher) -> u32 {
    let term = matcher.term();
    let mut score = 0;

    if fields.title == term {
        score += EXACT_TITLE;
    } else if fields.title.contains(term) {
        score += TITLE_SUBSTRING;
    }

    if fields.keywords.contains(term) {
        score += KEYWORD;
    }

    if fields.content.contains(term) {
        score += CONTENT_SUBSTRING;
    }

    for word in fields.title.split_whitespace() {
        if word.starts_with(term) {
            score += TITLE_WORD_PREFIX;
        }
        if word.contains(term) {
            score += TITLE_WORD_SUBSTRING;
        }
    }

    score += matcher.count_in(&fields.title) * TITLE_OCCURRENCE;
    score += matcher.count_in(&fields.content) * CONTENT_OCCURRENCE;

    score
}

/// Total relevance of `doc` for the given terms. Zero means no match.
pub fn score_document(doc: &SearchDocument, matchers: &[TermMatcher]) -> u32 {
    let fields = NormalizedFields::of(doc);
    matchers
        .iter()
        .map(|matcher| term_score(&fields, matcher))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;
    use assert2::check;
    use rstest::rstest;

    fn doc(title: &str, content: &str, keywords: &[&str]) -> SearchDocument {
        SearchDocument {
            id: "t".to_string(),
            title: title.to_string(),
            doc_type: DocumentType::Content,
            category: "P".to_string(),
            content: content.to_string(),
            href: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn score(d: &SearchDocument, terms: &[&str]) -> u32 {
        let matchers: Vec<_> = terms.iter().map(|t| TermMatcher::new(t)).collect();
        score_document(d, &matchers)
    }

    #[test]
    fn exact_title_replaces_substring_bonus() {
        // exact 100 + prefix 25 + word substring 15 + one title occurrence 5
        check!(score(&doc("Rust", "", &[]), &["rust"]) == 145);
    }

    #[test]
    fn substring_title_rules_accumulate() {
        // substring 50 + prefix 25 + word substring 15 + occurrence 5
        check!(score(&doc("Rustacean", "", &[]), &["rust"]) == 95);
    }

    #[rstest]
    #[case(doc("Other", "", &["rusty"]), 30)]
    #[case(doc("Other", "rust and more rust", &[]), 12)]
    #[case(doc("Other", "nothing here", &[]), 0)]
    fn test_non_title_rules(#[case] d: SearchDocument, #[case] expected: u32) {
        check!(score(&d, &["rust"]) == expected);
    }

    #[test]
    fn every_title_word_counts() {
        // "go go": substring 50, two words x (25 + 15), two occurrences x 5
        check!(score(&doc("go go", "", &[]), &["go"]) == 50 + 80 + 10);
    }

    #[test]
    fn terms_are_summed() {
        let d = doc("Rust Blog", "", &[]);
        check!(score(&d, &["rust", "blog"]) == score(&d, &["rust"]) + score(&d, &["blog"]));
    }

    #[rstest]
    #[case("c++")]
    #[case("(a")]
    #[case("$^.*")]
    #[case("[x]")]
    fn special_characters_are_literal(#[case] term: &str) {
        let d = doc("Other", &format!("about {term} and {term}"), &[]);
        let matcher = TermMatcher::new(term);
        check!(matcher.occurrences.is_some());
        check!(score(&d, &[term]) == CONTENT_SUBSTRING + 2 * CONTENT_OCCURRENCE);
    }

    #[test]
    fn matching_is_case_insensitive() {
        check!(score(&doc("HOME", "", &["HOME"]), &["home"]) == score(&doc("home", "", &["home"]), &["home"]));
    }
}
