//! Client-side search for a single-page blog.
//!
//! Documents come from a static seed plus whatever can be read off the page
//! through a [`ContentProvider`]. Queries are scored with fixed weights, the
//! picks that end a search are remembered in a small recency list, and the
//! [`SearchController`] ties it together with debounced, cancellable timing.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod index;
pub mod page;
pub mod recent;
pub mod search;
pub mod tracing;
pub mod types;

pub use config::SearchConfig;
pub use controller::{Navigation, SearchController, SearchState};
pub use error::{ExtractError, Result, StoreError};
pub use index::{SearchIndex, build_index, static_documents};
pub use page::{ContentProvider, PageTree};
pub use recent::{FileStore, KeyValueStore, MemoryStore, RecentSearches};
pub use search::{rank, rank_with_limit};
pub use types::{
    DocumentType, RecentSearchEntry, ScoredDocument, SearchDocument, SuggestedSearchEntry,
};
