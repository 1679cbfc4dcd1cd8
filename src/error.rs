//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for blog-search operations that may surface to a caller.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the config and CLI layers.
pub type Result<T> = anyhow::Result<T>;

/// Error raised while reading the page tree during extraction.
///
/// Never escapes [`crate::index::SearchIndex::rebuild`]: any of these degrades the
/// index to the static seed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A node handle no longer refers to an element in the tree.
    #[error("node {0} is not part of the page tree")]
    StaleNode(usize),
    /// The selector could not be parsed.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    /// The provider failed for a reason of its own.
    #[error("content provider failed: {0}")]
    Provider(String),
}

/// Error returned by a [`crate::recent::KeyValueStore`].
///
/// The recency store swallows these; they only reach the diagnostic channel.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}
