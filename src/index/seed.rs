//! Hardcoded navigation targets that are always searchable.

use crate::types::{DocumentType, SearchDocument};

/// (id, title, content, href, keywords)
type SeedEntry = (&'static str, &'static str, &'static str, &'static str, &'static [&'static str]);

const SEED: &[SeedEntry] = &[
    (
        "nav-home",
        "Home",
        "Welcome to the home page",
        "#home",
        &["home", "welcome", "main", "landing"],
    ),
    (
        "nav-categories",
        "Categories",
        "Browse content by categories",
        "#categories",
        &["categories", "browse", "filter", "topics"],
    ),
    (
        "nav-archives",
        "Archives",
        "View archived posts and content",
        "#archives",
        &["archives", "old", "past", "history", "posts"],
    ),
    (
        "nav-friends",
        "Friends",
        "Friends and connections",
        "#friends",
        &["friends", "connections", "network", "community"],
    ),
    (
        "nav-about",
        "About",
        "About page and information",
        "#about",
        &["about", "bio", "profile", "information"],
    ),
];

/// The five site sections, in menu order.
///
/// Used as the base layer of every index and as the fallback when the page
/// cannot be read.
pub fn static_documents() -> Vec<SearchDocument> {
    SEED.iter()
        .map(|(id, title, content, href, keywords)| SearchDocument {
            id: (*id).to_string(),
            title: (*title).to_string(),
            doc_type: DocumentType::Navigation,
            category: "Page".to_string(),
            content: (*content).to_string(),
            href: Some((*href).to_string()),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn seed_is_stable() {
        let docs = static_documents();
        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        check!(titles == vec!["Home", "Categories", "Archives", "Friends", "About"]);
        check!(docs == static_documents());
        check!(docs.iter().all(|d| d.href.as_deref().is_some_and(|h| h.starts_with('#'))));
    }
}
