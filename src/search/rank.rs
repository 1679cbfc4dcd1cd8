//! Query ranking over a document snapshot.

use super::scoring::{TermMatcher, score_document};
use super::tokenize::query_terms;
use crate::types::{ScoredDocument, SearchDocument};

/// Upper bound on the number of results returned by [`rank`].
pub const MAX_RESULTS: usize = 10;

/// Ranks `index` against `query`, keeping at most [`MAX_RESULTS`] results.
pub fn rank(query: &str, index: &[SearchDocument]) -> Vec<ScoredDocument> {
    rank_with_limit(query, index, MAX_RESULTS)
}

/// Ranks `index` against `query`.
///
/// Blank queries produce no results. Documents scoring zero are dropped; the
/// rest are ordered by descending score, ties keeping their index order.
pub fn rank_with_limit(query: &str, index: &[SearchDocument], limit: usize) -> Vec<ScoredDocument> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let matchers: Vec<TermMatcher> = terms.iter().map(|t| TermMatcher::new(t)).collect();

    let mut scored: Vec<ScoredDocument> = index
        .iter()
        .filter_map(|doc| {
            let score = score_document(doc, &matchers);
            (score > 0).then(|| ScoredDocument {
                document: doc.clone(),
                score,
            })
        })
        .collect();

    // stable: equal scores keep index order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}
