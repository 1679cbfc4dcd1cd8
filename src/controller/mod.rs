//! Search controller: the thin layer between the search dropdown and the engine.
//!
//! The controller owns the query text, the [`SearchIndex`] and the recency
//! store. Ranking runs after a debounce delay and page extraction after a
//! mount delay; both are cancellable [`TaskHandle`]s. Observers follow a
//! [`SearchState`] through a `watch` channel.

mod schedule;

pub use schedule::{TaskHandle, schedule};

use crate::config::SearchConfig;
use crate::index::SearchIndex;
use crate::page::ContentProvider;
use crate::recent::{KeyValueStore, RecentSearches};
use crate::types::{RecentSearchEntry, ScoredDocument, SearchDocument, SuggestedSearchEntry};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::watch;

/// What the host page should do after a result is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Smooth-scroll the element with this id into view.
    ScrollTo { anchor: String },
    /// Full navigation to another page or site.
    Navigate { url: String },
    /// Not navigable, or the anchor is not on the page.
    Stay,
}

/// Snapshot of everything the dropdown renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ScoredDocument>,
    pub recent: Vec<RecentSearchEntry>,
    /// True between a query change and its debounced ranking.
    pub is_searching: bool,
    pub is_open: bool,
}

impl SearchState {
    fn query_is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Recent and suggested entries are shown while the dropdown is open with no query.
    pub fn show_recent(&self) -> bool {
        self.is_open && self.query_is_blank()
    }

    pub fn show_results(&self) -> bool {
        self.is_open && !self.query_is_blank() && self.has_results()
    }
}

/// State shared with scheduled tasks.
struct Shared<P, S> {
    provider: Mutex<P>,
    index: RwLock<SearchIndex>,
    recent: RecentSearches<S>,
    state: watch::Sender<SearchState>,
    max_results: usize,
}

impl<P: ContentProvider, S: KeyValueStore> Shared<P, S> {
    fn rank(&self, query: &str) -> Vec<ScoredDocument> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rank(query, self.max_results)
    }

    /// Publishes results for `query` unless the query has moved on meanwhile.
    fn publish_results(&self, query: &str) {
        let results = self.rank(query);
        self.state.send_if_modified(|state| {
            if state.query != query {
                return false;
            }
            state.results = results;
            state.is_searching = false;
            true
        });
    }

    fn rebuild_index(&self) -> usize {
        let mut provider = self.provider.lock().unwrap_or_else(PoisonError::into_inner);
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        index.rebuild(&mut *provider).len()
    }
}

/// Drives search for one mounted search box.
pub struct SearchController<P, S> {
    shared: Arc<Shared<P, S>>,
    suggested: Vec<SuggestedSearchEntry>,
    config: SearchConfig,
    pending_search: Option<TaskHandle>,
    pending_index: Option<TaskHandle>,
}

impl<P, S> std::fmt::Debug for SearchController<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &*self.shared.state.borrow())
            .field("pending_search", &self.pending_search.is_some())
            .field("pending_index", &self.pending_index.is_some())
            .finish()
    }
}

impl<P, S> SearchController<P, S>
where
    P: ContentProvider + Send + 'static,
    S: KeyValueStore + 'static,
{
    pub fn new(provider: P, store: S, config: SearchConfig) -> Self {
        let recent = RecentSearches::new(store)
            .with_key(config.storage_key.clone())
            .with_capacity(config.recent_capacity)
            .with_suggested(config.suggested_count);
        let suggested = recent.get_suggested();
        let (state, _) = watch::channel(SearchState::default());

        Self {
            shared: Arc::new(Shared {
                provider: Mutex::new(provider),
                index: RwLock::new(SearchIndex::new()),
                recent,
                state,
                max_results: config.max_results,
            }),
            suggested,
            config,
            pending_search: None,
            pending_index: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Loads recent searches and schedules page extraction after the mount delay.
    pub fn mount(&mut self) {
        let recent = self.shared.recent.get_recent();
        self.shared.state.send_modify(|state| state.recent = recent);

        let shared = Arc::clone(&self.shared);
        self.pending_index = Some(schedule(self.config.index_delay(), move || {
            let count = shared.rebuild_index();
            tracing::debug!("Mount-time index ready with {} documents", count);

            let query = shared.state.borrow().query.clone();
            if !query.trim().is_empty() {
                shared.publish_results(&query);
            }
        }));
    }

    /// Cancels pending ranking and extraction.
    pub fn teardown(&mut self) {
        if let Some(task) = self.pending_search.take() {
            task.cancel();
        }
        if let Some(task) = self.pending_index.take() {
            task.cancel();
        }
    }

    /// Updates the query. Ranking runs after the debounce delay; any earlier pending ranking is cancelled.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if let Some(task) = self.pending_search.take() {
            task.cancel();
        }

        let blank = query.trim().is_empty();
        self.shared.state.send_modify(|state| {
            state.query.clone_from(&query);
            state.is_searching = !blank;
            if blank {
                state.results.clear();
            }
        });

        if blank {
            return;
        }

        tracing::debug!("Scheduling search for '{}' in {:?}", query, self.config.debounce());
        let shared = Arc::clone(&self.shared);
        self.pending_search = Some(schedule(self.config.debounce(), move || {
            shared.publish_results(&query);
        }));
    }

    pub fn set_open(&mut self, open: bool) {
        self.shared.state.send_if_modified(|state| {
            let changed = state.is_open != open;
            state.is_open = open;
            changed
        });
    }

    /// Escape closes the dropdown without touching the query.
    pub fn handle_escape(&mut self) {
        self.set_open(false);
    }

    /// Clicking a recent or suggested entry searches for its text and closes the dropdown.
    pub fn apply_suggestion(&mut self, text: &str) {
        self.set_query(text);
        self.set_open(false);
    }

    /// Records the pick (when a query is active) and tells the host where to go.
    pub fn select(&mut self, document: &SearchDocument) -> Navigation {
        let query = self.shared.state.borrow().query.clone();
        if !query.trim().is_empty() {
            self.shared.recent.save_recent(&query, document);
            let recent = self.shared.recent.get_recent();
            self.shared.state.send_modify(|state| state.recent = recent);
        }
        self.navigation_for(document.href.as_deref())
    }

    /// Dismisses one recent entry.
    pub fn remove_recent(&mut self, timestamp: u64) -> Vec<RecentSearchEntry> {
        let updated = self.shared.recent.remove_recent(timestamp);
        let published = updated.clone();
        self.shared.state.send_modify(|state| state.recent = published);
        updated
    }

    pub fn suggested(&self) -> &[SuggestedSearchEntry] {
        &self.suggested
    }

    /// Rebuilds the index immediately, outside the mount schedule.
    pub fn refresh_index(&self) -> usize {
        self.shared.rebuild_index()
    }

    /// Ranks against the current index without debounce.
    pub fn rank_now(&self, query: &str) -> Vec<ScoredDocument> {
        self.shared.rank(query)
    }

    /// Copy of the current document snapshot.
    pub fn documents(&self) -> Vec<SearchDocument> {
        self.shared
            .index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .documents()
            .to_vec()
    }

    fn navigation_for(&self, href: Option<&str>) -> Navigation {
        let Some(href) = href else {
            return Navigation::Stay;
        };
        let Some(anchor) = href.strip_prefix('#') else {
            return Navigation::Navigate {
                url: href.to_string(),
            };
        };

        let provider = self.shared.provider.lock().unwrap_or_else(PoisonError::into_inner);
        match provider.find_by_id(anchor) {
            Ok(Some(_)) => Navigation::ScrollTo {
                anchor: anchor.to_string(),
            },
            Ok(None) => Navigation::Stay,
            Err(e) => {
                tracing::debug!("Cannot resolve anchor '{}': {}", href, e);
                Navigation::Stay
            }
        }
    }
}
