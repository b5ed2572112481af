//! Link extraction and structural grouping.
//!
//! Every usable anchor becomes a [`Link`] carrying its structural path.
//! Links whose paths have the same shape once positional indices are erased
//! are grouped together; a catalog is always one such group (or a part of
//! one).

use std::collections::HashMap;

use url::Url;

use crate::dom::PathDocument;
use crate::path::StructuralPath;
use crate::url_utils::{is_navigable_href, resolve_href};
use crate::Options;

/// Landmark elements whose links are never catalog entries.
pub const NOISE_REGION_TAGS: &[&str] = &["header", "footer", "nav", "aside", "abbr"];

/// One anchor of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Structural path of the anchor element.
    pub path: StructuralPath,
    /// Link target; absolute when a base URL is configured.
    pub url: String,
    /// Whitespace-collapsed visible text.
    pub text: String,
}

impl Link {
    /// Text length in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Links sharing one normalized path, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGroup {
    /// Normalized path shared by every member, e.g. `/html/body/ul/li/a`.
    pub shape: String,
    pub links: Vec<Link>,
}

impl LinkGroup {
    /// Longest member text, in characters.
    #[must_use]
    pub fn max_text_len(&self) -> usize {
        self.links.iter().map(Link::text_len).max().unwrap_or(0)
    }
}

/// Collect every navigable anchor of the document.
///
/// Anchors without `href`, fragment-only anchors and `javascript:` links
/// are skipped. Returns an empty list for a document without anchors.
#[must_use]
pub fn extract_links<D: PathDocument>(doc: &D, base: Option<&Url>) -> Vec<Link> {
    doc.anchors()
        .into_iter()
        .filter_map(|node| {
            let href = doc.attribute(node, "href")?;
            if !is_navigable_href(&href) {
                return None;
            }
            Some(Link {
                path: StructuralPath::parse_lenient(&doc.node_path(node)),
                url: resolve_href(&href, base),
                text: doc.inner_text(node),
            })
        })
        .collect()
}

/// Group links by normalized path.
///
/// Links inside noise landmarks are dropped first. Groups are returned in
/// order of first appearance; groups with fewer than `min_link_count`
/// members, or whose longest text is below `min_text_len`, are dropped.
#[must_use]
pub fn group_links(links: Vec<Link>, options: &Options) -> Vec<LinkGroup> {
    let mut groups: Vec<LinkGroup> = Vec::new();
    let mut by_shape: HashMap<String, usize> = HashMap::new();

    for link in links {
        if link.path.contains_any_tag(NOISE_REGION_TAGS) {
            continue;
        }
        let shape = link.path.normalized();
        match by_shape.get(&shape) {
            Some(&i) => groups[i].links.push(link),
            None => {
                by_shape.insert(shape.clone(), groups.len());
                groups.push(LinkGroup {
                    shape,
                    links: vec![link],
                });
            }
        }
    }

    groups.retain(|g| g.links.len() >= options.min_link_count && g.max_text_len() >= options.min_text_len);
    groups
}
