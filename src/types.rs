//! Shared data model: indexed documents, scored results and recency records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of page element a document was extracted from.
///
/// Informational only: shown next to the result, never used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    Navigation,
    Heading,
    Content,
    Profile,
    Button,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Heading => "Heading",
            Self::Content => "Content",
            Self::Profile => "Profile",
            Self::Button => "Button",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One indexed, searchable unit of page content.
///
/// Created fresh on every extraction pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Unique within one extraction pass; stable only for seed documents.
    pub id: String,
    /// Human-readable label, also the deduplication key.
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Free-form sub-classification (tag name, "Sidebar", "Page", ...).
    pub category: String,
    pub content: String,
    /// Navigation target; `None` means not navigable.
    pub href: Option<String>,
    /// Lowercase tokens derived from title or content.
    pub keywords: Vec<String>,
}

impl SearchDocument {
    /// Key used to collapse duplicates in the index: trimmed, lowercased title.
    pub fn dedup_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

/// A document paired with its relevance for one query. Only produced by ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: SearchDocument,
    pub score: u32,
}

/// A persisted record of a past search that ended in a selection.
///
/// `timestamp` doubles as the entry's identity for removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearchEntry {
    pub query: String,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub href: Option<String>,
    /// Milliseconds since the Unix epoch at selection time.
    pub timestamp: u64,
}

/// Read-only projection of a seed document shown while no query is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedSearchEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub href: Option<String>,
    pub keywords: Vec<String>,
}

impl From<&SearchDocument> for SuggestedSearchEntry {
    fn from(doc: &SearchDocument) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            doc_type: doc.doc_type,
            href: doc.href.clone(),
            keywords: doc.keywords.clone(),
        }
    }
}
