//! Weighted substring search over the page index.
//!
//! This module provides query tokenization, per-document scoring and the
//! bounded, stable ranking the search dropdown displays.

// Module declarations
pub(crate) mod rank;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use rank::{MAX_RESULTS, rank, rank_with_limit};
pub use scoring::{TermMatcher, score_document};
pub use tokenize::query_terms;
