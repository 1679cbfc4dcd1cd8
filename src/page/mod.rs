//! Access to the rendered page the search index is built from.
//!
//! The extractor never touches a concrete tree: it talks to a [`ContentProvider`],
//! which a browser binding, a parsed snapshot or a test fixture can implement.
//! [`PageTree`] is the in-crate implementation over a parsed HTML snapshot,
//! used by the CLI and the tests.

mod tree;

pub use tree::{NodeId, PageTree};

use crate::error::ExtractError;

/// Read access to a live element tree, plus the one write the extractor needs.
pub trait ContentProvider {
    /// Cheap handle to one element.
    type Node: Copy;

    /// All elements matching a CSS-style selector, in document order, without duplicates.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, ExtractError>;

    /// Visible text of the element.
    ///
    /// Descendant `script`/`style` elements and anything marked `hidden`,
    /// `.sr-only` or `aria-hidden="true"` contribute nothing.
    fn text_of(&self, node: Self::Node) -> Result<String, ExtractError>;

    fn attribute_of(&self, node: Self::Node, name: &str) -> Result<Option<String>, ExtractError>;

    /// Lowercase tag name.
    fn tag_name(&self, node: Self::Node) -> Result<String, ExtractError>;

    /// Next element sibling, skipping text.
    fn next_sibling(&self, node: Self::Node) -> Result<Option<Self::Node>, ExtractError>;

    /// First element whose `id` attribute equals `id` exactly.
    ///
    /// Ids are compared as plain strings, so generated ids that are not valid
    /// CSS identifiers still resolve. Ids written by [`Self::set_attribute`]
    /// are visible here.
    fn find_by_id(&self, id: &str) -> Result<Option<Self::Node>, ExtractError> {
        for node in self.query_all("*")? {
            if self.attribute_of(node, "id")?.as_deref() == Some(id) {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Used to give headings an `id` so results can scroll to them.
    fn set_attribute(
        &mut self,
        node: Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), ExtractError>;
}
