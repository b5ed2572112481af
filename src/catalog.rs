//! Catalog item materialization.
//!
//! Turns a generic path back into catalog entries by re-querying the live
//! document: every node matched by the row part of the path is one entry,
//! and the rest of the path locates the entry's link inside it.

use std::collections::HashMap;

use tracing::trace;

use crate::date::{extract_raw_date, parse_raw_date};
use crate::dom::PathDocument;
use crate::path::StructuralPath;
use crate::result::CatalogItem;
use crate::url_utils::{is_navigable_href, resolve_href};
use crate::Options;

/// Materialize the catalog entries matched by `pattern`.
///
/// Entries without a usable `href` are skipped. Entries are de-duplicated by
/// URL: the first occurrence is kept, except that a later occurrence with a
/// title replaces an earlier one without. Document order is preserved.
#[must_use]
pub fn materialize<D: PathDocument>(doc: &D, pattern: &StructuralPath, options: &Options) -> Vec<CatalogItem> {
    let base = options.base();
    let (container_path, link_path) = pattern.split_iteration();

    let mut items: Vec<CatalogItem> = Vec::new();
    let mut by_url: HashMap<String, usize> = HashMap::new();

    for container in doc.select_all(&container_path) {
        let link = if link_path.is_empty() {
            Some(container)
        } else {
            doc.select_relative(container, &link_path).into_iter().next()
        };
        let Some(link) = link else {
            continue;
        };
        let Some(href) = doc.attribute(link, "href").filter(|h| is_navigable_href(h)) else {
            continue;
        };

        let full_text = doc.inner_text(container);
        let published_raw = extract_raw_date(&full_text);
        let item = CatalogItem {
            path: doc.node_path(link),
            url: resolve_href(&href, base.as_ref()),
            title: doc.inner_text(link),
            published: published_raw.as_deref().and_then(parse_raw_date),
            has_date: published_raw.is_some(),
            published_raw,
            full_text,
        };

        match by_url.get(&item.url) {
            Some(&i) => {
                if items[i].title.is_empty() && !item.title.is_empty() {
                    trace!(url = %item.url, "replacing untitled duplicate");
                    items[i] = item;
                }
            }
            None => {
                by_url.insert(item.url.clone(), items.len());
                items.push(item);
            }
        }
    }

    items
}

/// Sort items newest first.
///
/// Only applies when every item carries a parsed date; otherwise the
/// document order is left untouched. The sort is stable.
pub fn sort_by_published_desc(items: &mut [CatalogItem]) {
    if items.iter().all(|item| item.published.is_some()) {
        items.sort_by(|a, b| b.published.cmp(&a.published));
    }
}
