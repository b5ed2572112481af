//! DOM Operations Adapter
//!
//! The analyzer consumes documents through the [`PathDocument`] capability:
//! select nodes by structural path, map a node back to its path, read its
//! text and attributes. This module implements it for `dom_query::Document`
//! and keeps the small set of `dom_query` helpers the rest of the crate uses.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::path::{PathSegment, StructuralPath};
use crate::patterns::WHITESPACE_NORMALIZE;

/// A parsed document addressable by structural paths.
///
/// Implementations must return nodes in document order.
pub trait PathDocument {
    /// Handle to one element of the document.
    type Node<'a>: Copy
    where
        Self: 'a;

    /// Every anchor element carrying an `href` attribute.
    fn anchors<'a>(&'a self) -> Vec<Self::Node<'a>>;

    /// All elements matching `path`; wildcard segments match every sibling.
    fn select_all<'a>(&'a self, path: &StructuralPath) -> Vec<Self::Node<'a>>;

    /// First element matching `path`.
    fn select_first<'a>(&'a self, path: &StructuralPath) -> Option<Self::Node<'a>> {
        self.select_all(path).into_iter().next()
    }

    /// Elements matching `relative` when evaluated from `base`.
    fn select_relative<'a>(
        &'a self,
        base: Self::Node<'a>,
        relative: &StructuralPath,
    ) -> Vec<Self::Node<'a>>;

    /// Structural path string of `node`, e.g. `/html[1]/body[1]/a[2]`.
    fn node_path<'a>(&'a self, node: Self::Node<'a>) -> String;

    /// Rendered text of `node` and its descendants, whitespace-collapsed.
    fn inner_text<'a>(&'a self, node: Self::Node<'a>) -> String;

    /// Attribute lookup.
    fn attribute<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<String>;
}

impl PathDocument for Document {
    type Node<'a> = NodeRef<'a>
    where
        Self: 'a;

    fn anchors<'a>(&'a self) -> Vec<NodeRef<'a>> {
        self.select("a[href]").nodes().to_vec()
    }

    fn select_all<'a>(&'a self, path: &StructuralPath) -> Vec<NodeRef<'a>> {
        // The document node is the parent of <html>; paths start below it.
        let Some(html) = self.select("html").nodes().first().copied() else {
            return Vec::new();
        };
        let Some(document_node) = html.parent() else {
            return Vec::new();
        };
        evaluate(vec![document_node], path)
    }

    fn select_relative<'a>(&'a self, base: NodeRef<'a>, relative: &StructuralPath) -> Vec<NodeRef<'a>> {
        evaluate(vec![base], relative)
    }

    fn node_path<'a>(&'a self, node: NodeRef<'a>) -> String {
        structural_path(node).to_string()
    }

    fn inner_text<'a>(&'a self, node: NodeRef<'a>) -> String {
        normalize_text(&text_content(&Selection::from(node)))
    }

    fn attribute<'a>(&'a self, node: NodeRef<'a>, name: &str) -> Option<String> {
        get_attribute(&Selection::from(node), name)
    }
}

/// Walk `path` one segment at a time, starting from `roots`.
fn evaluate<'a>(roots: Vec<NodeRef<'a>>, path: &StructuralPath) -> Vec<NodeRef<'a>> {
    let mut current = roots;
    for seg in path.segments() {
        current = step(&current, seg);
        if current.is_empty() {
            break;
        }
    }
    current
}

fn step<'a>(nodes: &[NodeRef<'a>], seg: &PathSegment) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    for node in nodes {
        let mut position = 0;
        for child in node.children() {
            if !child.is_element() || !has_tag(&child, &seg.tag) {
                continue;
            }
            position += 1;
            if seg.index.is_none_or(|i| i == position) {
                out.push(child);
            }
        }
    }
    out
}

fn has_tag(node: &NodeRef, tag: &str) -> bool {
    node.node_name().is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Compute the structural path of an element.
///
/// Each ancestor contributes `tag[n]`, where `n` counts the element and its
/// preceding same-tag element siblings.
#[must_use]
pub fn structural_path(node: NodeRef) -> StructuralPath {
    let mut segments = Vec::new();
    let mut current = Some(node);

    while let Some(n) = current {
        if !n.is_element() {
            break;
        }
        let tag = n
            .node_name()
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_default();
        let index = sibling_index(n, &tag);
        segments.push(PathSegment::new(tag, index));
        current = n.parent();
    }

    segments.reverse();
    StructuralPath::new(segments)
}

fn sibling_index(node: NodeRef, tag: &str) -> usize {
    let Some(parent) = node.parent() else {
        return 1;
    };
    let mut index = 0;
    for child in parent.children() {
        if child.is_element() && has_tag(&child, tag) {
            index += 1;
        }
        if child.id == node.id {
            break;
        }
    }
    index.max(1)
}

/// Collapse whitespace runs and trim.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
