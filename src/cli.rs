use crate::config::SearchConfig;
use crate::controller::{Navigation, SearchController};
use crate::error::Result;
use crate::index::SearchIndex;
use crate::page::PageTree;
use crate::recent::{FileStore, KeyValueStore, RecentSearches};
use crate::types::ScoredDocument;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "blog-search")]
#[command(about = "Search a blog page and keep track of recent picks", long_about = None)]
pub struct Cli {
    /// Config file; defaults to the platform config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank documents against a query.
    Search {
        query: String,
        /// Saved HTML of the page; only the static pages are searched without it.
        #[arg(short, long)]
        page: Option<PathBuf>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print every indexed document as JSON.
    Index {
        #[arg(short, long)]
        page: Option<PathBuf>,
    },
    /// Pick the result at `rank` (1-based) and record it as a recent search.
    Select {
        query: String,
        rank: usize,
        #[arg(short, long)]
        page: Option<PathBuf>,
    },
    /// Show recent searches, newest first.
    Recent,
    /// Remove the recent search with this timestamp.
    Forget { timestamp: u64 },
    /// Show suggested searches.
    Suggest,
}

/// Parses a saved HTML page, or an empty page when no file is given.
pub fn load_page(path: Option<&Path>) -> Result<PageTree> {
    let Some(path) = path else {
        return Ok(PageTree::empty());
    };
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page file {}", path.display()))?;
    Ok(PageTree::parse(&html))
}

/// Joins lines with a trailing newline after each.
fn lines(rows: impl IntoIterator<Item = String>) -> String {
    rows.into_iter().map(|line| line + "\n").collect()
}

fn format_results(results: &[ScoredDocument]) -> String {
    if results.is_empty() {
        return "No results found\n".to_string();
    }
    lines(results.iter().enumerate().map(|(i, result)| {
        let doc = &result.document;
        format!(
            "{:>2}. [{}] {} ({}) score={} {}",
            i + 1,
            doc.doc_type,
            doc.title,
            doc.category,
            result.score,
            doc.href.as_deref().unwrap_or("-")
        )
    }))
}

/// Runs one command, returning what should be printed on stdout.
pub async fn run(cli: Cli) -> Result<String> {
    let config = match cli.config {
        Some(path) => SearchConfig::load(&path)?,
        None => match SearchConfig::default_path() {
            Some(path) => SearchConfig::load(&path)?,
            None => SearchConfig::default(),
        },
    };
    let store = FileStore::new(config.storage_dir());
    execute(cli.command, &config, store).await
}

/// Runs `command` against an explicit store.
pub async fn execute<S: KeyValueStore + 'static>(
    command: Commands,
    config: &SearchConfig,
    store: S,
) -> Result<String> {
    let store = Arc::new(store);
    let recent = || {
        RecentSearches::new(Arc::clone(&store))
            .with_key(config.storage_key.clone())
            .with_capacity(config.recent_capacity)
            .with_suggested(config.suggested_count)
    };

    match command {
        Commands::Search { query, page, limit } => {
            let mut tree = load_page(page.as_deref())?;
            let mut index = SearchIndex::new();
            index.rebuild(&mut tree);
            let results = index.rank(&query, limit.unwrap_or(config.max_results));
            Ok(format_results(&results))
        }
        Commands::Index { page } => {
            let mut tree = load_page(page.as_deref())?;
            let mut index = SearchIndex::new();
            index.rebuild(&mut tree);
            let mut out = serde_json::to_string_pretty(index.documents())
                .context("Failed to encode index")?;
            out.push('\n');
            Ok(out)
        }
        Commands::Select { query, rank, page } => {
            let tree = load_page(page.as_deref())?;
            let mut controller = SearchController::new(tree, Arc::clone(&store), config.clone());
            controller.refresh_index();
            controller.set_query(query.as_str());

            let results = controller.rank_now(&query);
            let Some(picked) = rank.checked_sub(1).and_then(|i| results.get(i)) else {
                controller.teardown();
                bail!("No result at rank {} for '{}' ({} results)", rank, query, results.len());
            };

            let navigation = controller.select(&picked.document);
            controller.teardown();
            Ok(match navigation {
                Navigation::ScrollTo { anchor } => format!("Scroll to #{anchor}\n"),
                Navigation::Navigate { url } => format!("Navigate to {url}\n"),
                Navigation::Stay => format!("Selected '{}'\n", picked.document.title),
            })
        }
        Commands::Recent => {
            let entries = recent().get_recent();
            if entries.is_empty() {
                return Ok("No recent searches\n".to_string());
            }
            Ok(lines(entries.into_iter().map(|entry| {
                format!(
                    "{}\t{}\t[{}] {}",
                    entry.timestamp, entry.query, entry.doc_type, entry.title
                )
            })))
        }
        Commands::Forget { timestamp } => {
            let remaining = recent().remove_recent(timestamp);
            Ok(format!("{} recent searches remain\n", remaining.len()))
        }
        Commands::Suggest => Ok(lines(recent().get_suggested().into_iter().map(|entry| {
            format!("{}\t{}", entry.title, entry.href.as_deref().unwrap_or("-"))
        }))),
    }
}
