//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `blog_page`: a small rendered blog page (nav, sidebar, two posts' worth of headings, buttons)
//! - `temp_workspace`: an empty temporary directory for file-backed stores
//!
//! Controllers built with [`controller`] use an in-memory store, so tests never
//! share recent-search state.

use blog_search::page::PageTree;
use blog_search::{FileStore, MemoryStore, SearchConfig, SearchController};
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Documents the blog page yields on top of the five static pages.
#[allow(dead_code)] // Used by some integration test crates only
pub const BLOG_PAGE_DOCUMENTS: usize = 14;

/// A temporary workspace directory for test isolation.
///
/// The directory is removed when the workspace is dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// A file-backed store rooted at `<workspace>/store`.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root.join("store"))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn temp_workspace() -> TempWorkspace {
    TempWorkspace::new()
}

/// Rendered HTML of the page every integration test searches.
///
/// Headings and the about paragraph have no `id`, so extraction assigns them one.
pub const BLOG_PAGE_HTML: &str = concat!(
    "<!DOCTYPE html><html><head><title>Ferris Writes</title>",
    "<style>.sr-only { position: absolute; }</style></head><body>",
    "<nav><a href=\"#home\">Home</a><a href=\"#archives\">Archives</a>",
    "<a href=\"https://github.com/ferris\">GitHub</a></nav>",
    "<aside id=\"sidebar\"><div class=\"site-title\">Ferris Writes</div>",
    "<div class=\"site-subtitle\">Notes on systems programming</div></aside>",
    "<main><div id=\"home\">",
    "<h2>Understanding Ownership</h2>",
    "<p>Ownership is the most unique feature of Rust. It enables memory safety without a garbage collector.</p>",
    "<h3>Moves and copies</h3>",
    "<p>Assigning a value moves it unless the type implements Copy.</p>",
    "<h2>Lifetimes in practice</h2>",
    "<p>Lifetimes describe how long references stay valid.</p>",
    "</div><div id=\"about\"><p>Ferris is a crab who writes about compilers and tooling.</p></div></main>",
    "<button aria-label=\"Toggle theme\"></button>",
    "<button>Back to top</button>",
    "<button aria-hidden=\"true\">x</button>",
    "<script>document.title = 'not indexed';</script>",
    "</body></html>",
);

#[fixture]
pub fn blog_page() -> PageTree {
    PageTree::parse(BLOG_PAGE_HTML)
}

/// A controller over the blog page with default timing and an in-memory store.
#[allow(dead_code)] // Used by some integration test crates only
pub fn controller(page: PageTree) -> SearchController<PageTree, MemoryStore> {
    blog_search::tracing::init();
    SearchController::new(page, MemoryStore::new(), SearchConfig::default())
}
