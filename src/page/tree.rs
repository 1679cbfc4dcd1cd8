//! Parsed HTML snapshot implementing [`ContentProvider`].

use super::ContentProvider;
use crate::error::ExtractError;
use ahash::AHashMap;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};

/// Tags whose whole subtree is never visible text.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Handle to one element of a [`PageTree`]: its position in the parsed tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

fn is_hidden(element: &Element) -> bool {
    INVISIBLE_TAGS.contains(&element.name())
        || element.attr("hidden").is_some()
        || element.classes().any(|class| class == "sr-only")
        || element.attr("aria-hidden") == Some("true")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child)
            && !is_hidden(child.value())
        {
            collect_text(child, out);
        }
    }
}

/// A rendered page parsed with `scraper`.
///
/// The parsed document is never mutated. Attributes written through
/// [`ContentProvider::set_attribute`] live in an override map that
/// [`ContentProvider::attribute_of`] consults first.
#[derive(Debug, Clone)]
pub struct PageTree {
    html: Html,
    overrides: AHashMap<(NodeId, String), String>,
}

impl PageTree {
    /// Parses a full HTML document. Malformed markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            overrides: AHashMap::new(),
        }
    }

    /// An empty `<html><head></head><body></body></html>` document.
    pub fn empty() -> Self {
        Self::parse("")
    }

    fn element(&self, node: NodeId) -> Result<ElementRef<'_>, ExtractError> {
        self.html
            .tree
            .nodes()
            .nth(node.0)
            .and_then(ElementRef::wrap)
            .ok_or(ExtractError::StaleNode(node.0))
    }

    fn node_of(&self, element: ElementRef<'_>) -> Result<NodeId, ExtractError> {
        self.html
            .tree
            .nodes()
            .position(|node| node.id() == element.id())
            .map(NodeId)
            .ok_or_else(|| ExtractError::Provider("element is not part of this page".to_string()))
    }
}

impl ContentProvider for PageTree {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, ExtractError> {
        let parsed = Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        let positions: AHashMap<_, usize> = self
            .html
            .tree
            .nodes()
            .enumerate()
            .map(|(index, node)| (node.id(), index))
            .collect();

        self.html
            .select(&parsed)
            .map(|element| {
                positions
                    .get(&element.id())
                    .map(|&index| NodeId(index))
                    .ok_or_else(|| ExtractError::Provider(format!("selector '{selector}' matched a detached element")))
            })
            .collect()
    }

    fn text_of(&self, node: NodeId) -> Result<String, ExtractError> {
        let mut text = String::new();
        collect_text(self.element(node)?, &mut text);
        Ok(text)
    }

    fn attribute_of(&self, node: NodeId, name: &str) -> Result<Option<String>, ExtractError> {
        let element = self.element(node)?;
        if let Some(value) = self.overrides.get(&(node, name.to_string())) {
            return Ok(Some(value.clone()));
        }
        Ok(element.value().attr(name).map(str::to_string))
    }

    fn tag_name(&self, node: NodeId) -> Result<String, ExtractError> {
        Ok(self.element(node)?.value().name().to_ascii_lowercase())
    }

    fn next_sibling(&self, node: NodeId) -> Result<Option<NodeId>, ExtractError> {
        self.element(node)?
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|sibling| self.node_of(sibling))
            .transpose()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), ExtractError> {
        self.element(node)?;
        self.overrides
            .insert((node, name.to_string()), value.to_string());
        Ok(())
    }
}
