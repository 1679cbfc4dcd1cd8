//! The searchable document snapshot: static seed plus whatever the page yields.
//!
//! The index is an explicit value owned by whoever searches it. It is rebuilt
//! wholesale on request; there is no incremental maintenance or invalidation.

mod extract;
mod seed;

pub use extract::extract;
pub use seed::static_documents;

use crate::page::ContentProvider;
use crate::search::rank_with_limit;
use crate::types::{ScoredDocument, SearchDocument};
use ahash::AHashSet;
use std::time::Instant;

/// Merges seed and extracted documents, keeping the first document per normalized title.
///
/// Seed documents come first, so they win over extracted duplicates.
pub fn merge_unique(
    seed: Vec<SearchDocument>,
    extracted: Vec<SearchDocument>,
) -> Vec<SearchDocument> {
    let mut seen = AHashSet::new();
    seed.into_iter()
        .chain(extracted)
        .filter(|doc| seen.insert(doc.dedup_key()))
        .collect()
}

/// Builds a fresh document list from the page.
///
/// Never fails: if the page cannot be read, the static seed is returned and a
/// warning goes to the diagnostic channel.
pub fn build_index<P: ContentProvider>(provider: &mut P) -> Vec<SearchDocument> {
    match extract(provider) {
        Ok(extracted) => merge_unique(static_documents(), extracted),
        Err(e) => {
            tracing::warn!("Error indexing page content, using static items only: {}", e);
            static_documents()
        }
    }
}

/// Document snapshot searched by the controller.
///
/// Starts out holding only the static seed so that searching works before
/// the page has been read.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
    /// Number of completed rebuilds, for diagnostics.
    generation: u64,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    /// An index holding only the static seed.
    pub fn new() -> Self {
        Self {
            documents: static_documents(),
            generation: 0,
        }
    }

    /// Re-reads the page and replaces the snapshot.
    pub fn rebuild<P: ContentProvider>(&mut self, provider: &mut P) -> &[SearchDocument] {
        let start = Instant::now();
        self.documents = build_index(provider);
        self.generation += 1;

        tracing::info!(
            "Built search index: {} documents (generation {}) in {:?}",
            self.documents.len(),
            self.generation,
            start.elapsed()
        );

        &self.documents
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ranks the current snapshot; see [`crate::search::rank_with_limit`].
    pub fn rank(&self, query: &str, limit: usize) -> Vec<ScoredDocument> {
        rank_with_limit(query, &self.documents, limit)
    }
}
