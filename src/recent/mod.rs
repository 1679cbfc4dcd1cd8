//! Recent searches: a short, persisted history of queries that ended in a selection.
//!
//! Storage problems never reach the caller. Reads degrade to an empty list and
//! writes become no-ops, with a warning on the diagnostic channel.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::index::static_documents;
use crate::types::{RecentSearchEntry, SearchDocument, SuggestedSearchEntry};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key holding the JSON array of entries.
pub const DEFAULT_STORAGE_KEY: &str = "searchRecent";
/// Maximum number of entries kept.
pub const DEFAULT_CAPACITY: usize = 5;
/// Number of seed documents offered as suggestions.
pub const DEFAULT_SUGGESTED: usize = 2;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// The recency store over some [`KeyValueStore`].
#[derive(Debug)]
pub struct RecentSearches<S> {
    store: S,
    key: String,
    capacity: usize,
    suggested: usize,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
            suggested: DEFAULT_SUGGESTED,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_suggested(mut self, count: usize) -> Self {
        self.suggested = count;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored entries, most recent first. Missing or corrupt data reads as empty.
    ///
    /// Entries that no longer parse are dropped individually; a blob that is not
    /// a JSON array at all is treated as empty.
    pub fn get_recent(&self) -> Vec<RecentSearchEntry> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Recent searches unavailable: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values
                .into_iter()
                .filter_map(|value| serde_json::from_value(value).ok())
                .collect(),
            Err(e) => {
                tracing::warn!("Discarding unreadable recent searches: {}", e);
                Vec::new()
            }
        }
    }

    /// Records that `query` led to `selected`.
    ///
    /// Any earlier entry for the same query (ignoring case) is replaced, the new
    /// entry goes first, and the oldest entries beyond capacity are dropped.
    pub fn save_recent(&self, query: &str, selected: &SearchDocument) {
        let existing = self.get_recent();

        // strictly newer than anything stored, so timestamps stay unique ids
        let newest = existing.iter().map(|e| e.timestamp).max().unwrap_or(0);
        let timestamp = now_millis().max(newest.saturating_add(1));

        let entry = RecentSearchEntry {
            query: query.to_string(),
            title: selected.title.clone(),
            doc_type: selected.doc_type,
            href: selected.href.clone(),
            timestamp,
        };

        let normalized = query.to_lowercase();
        let updated: Vec<_> = std::iter::once(entry)
            .chain(
                existing
                    .into_iter()
                    .filter(|e| e.query.to_lowercase() != normalized),
            )
            .take(self.capacity)
            .collect();

        if let Err(e) = self.write(&updated) {
            tracing::warn!("Failed to save recent search '{}': {}", query, e);
        }
    }

    /// Drops the entry with `timestamp` and returns what remains.
    ///
    /// Returns an empty list if the result could not be written back.
    pub fn remove_recent(&self, timestamp: u64) -> Vec<RecentSearchEntry> {
        let remaining: Vec<_> = self
            .get_recent()
            .into_iter()
            .filter(|e| e.timestamp != timestamp)
            .collect();

        match self.write(&remaining) {
            Ok(()) => remaining,
            Err(e) => {
                tracing::warn!("Failed to remove recent search {}: {}", timestamp, e);
                Vec::new()
            }
        }
    }

    /// The first seed documents, shown when no query is active. Never touches storage.
    pub fn get_suggested(&self) -> Vec<SuggestedSearchEntry> {
        suggested_searches(self.suggested)
    }

    fn write(&self, entries: &[RecentSearchEntry]) -> Result<(), crate::error::StoreError> {
        let encoded = serde_json::to_string(entries)?;
        self.store.set(&self.key, &encoded)
    }
}

/// The first `count` seed documents projected to suggestions.
pub fn suggested_searches(count: usize) -> Vec<SuggestedSearchEntry> {
    static_documents()
        .iter()
        .take(count)
        .map(SuggestedSearchEntry::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::types::DocumentType;
    use assert2::check;

    struct Disabled;

    impl KeyValueStore for Disabled {
        fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("storage disabled".into()))
        }
        fn set(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("storage disabled".into()))
        }
    }

    fn doc(title: &str) -> SearchDocument {
        SearchDocument {
            id: title.to_lowercase(),
            title: title.to_string(),
            doc_type: DocumentType::Heading,
            category: "H2".to_string(),
            content: String::new(),
            href: Some(format!("#{}", title.to_lowercase())),
            keywords: vec![],
        }
    }

    #[test]
    fn empty_store_reads_empty() {
        check!(RecentSearches::new(MemoryStore::new()).get_recent().is_empty());
    }

    #[test]
    fn corrupt_blob_reads_empty() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        check!(RecentSearches::new(store).get_recent().is_empty());
    }

    #[test]
    fn unparsable_entries_are_dropped_individually() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r##"[{"query":"a","title":"A","type":"Heading","href":"#a","timestamp":2},{"query":1}]"##,
            )
            .unwrap();
        let recent = RecentSearches::new(store).get_recent();
        check!(recent.len() == 1);
        check!(recent[0].query == "a");
    }

    #[test]
    fn save_prepends_and_dedups_ignoring_case() {
        let recent = RecentSearches::new(MemoryStore::new());
        recent.save_recent("Home", &doc("Alpha"));
        recent.save_recent("rust", &doc("Beta"));
        recent.save_recent("HOME", &doc("Gamma"));

        let entries = recent.get_recent();
        let queries: Vec<_> = entries.iter().map(|e| e.query.as_str()).collect();
        check!(queries == vec!["HOME", "rust"]);
        check!(entries[0].title == "Gamma");
        check!(entries[0].timestamp > entries[1].timestamp);
    }

    #[test]
    fn maximal_stored_timestamp_does_not_overflow() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                &format!(r##"[{{"query":"a","title":"A","type":"Heading","href":"#a","timestamp":{}}}]"##, u64::MAX),
            )
            .unwrap();
        let recent = RecentSearches::new(store);
        recent.save_recent("b", &doc("Beta"));

        let entries = recent.get_recent();
        let queries: Vec<_> = entries.iter().map(|e| e.query.as_str()).collect();
        check!(queries == vec!["b", "a"]);
        check!(entries[0].timestamp == u64::MAX);
    }

    #[test]
    fn capacity_drops_oldest() {
        let recent = RecentSearches::new(MemoryStore::new()).with_capacity(3);
        for q in ["a", "b", "c", "d"] {
            recent.save_recent(q, &doc(q));
        }
        let queries: Vec<_> = recent.get_recent().into_iter().map(|e| e.query).collect();
        check!(queries == vec!["d", "c", "b"]);
    }

    #[test]
    fn disabled_storage_is_silent() {
        let recent = RecentSearches::new(Disabled);
        recent.save_recent("home", &doc("Home"));
        check!(recent.get_recent().is_empty());
        check!(recent.remove_recent(1).is_empty());
    }

    #[test]
    fn suggestions_are_first_seed_documents() {
        let suggested = RecentSearches::new(Disabled).get_suggested();
        let titles: Vec<_> = suggested.iter().map(|s| s.title.as_str()).collect();
        check!(titles == vec!["Home", "Categories"]);
    }
}
