//! Catalog detection pipeline.
//!
//! Auto-detection runs every stage: link extraction, grouping, tree
//! building, date annotation, pruning, block ranking and materialization.
//! Pattern replay skips straight to materialization.

use tracing::{debug, trace};

use crate::block::{self, Block};
use crate::catalog::materialize;
use crate::dom::PathDocument;
use crate::links::{extract_links, group_links};
use crate::path::StructuralPath;
use crate::prune::prune;
use crate::result::{CatalogItem, CatalogResult};
use crate::tree::LinkForest;
use crate::Options;

/// Detect the catalog of `doc`.
pub(crate) fn detect<D: PathDocument>(doc: &D, options: &Options) -> CatalogResult {
    let base = options.base();
    let links = extract_links(doc, base.as_ref());
    debug!(links = links.len(), "extracted links");

    let groups = group_links(links, options);
    debug!(groups = groups.len(), "kept link groups");

    let mut blocks = Vec::new();
    for group in &groups {
        let mut forest = LinkForest::build(&group.links);
        trace!(shape = %group.shape, trees = forest.roots().len(), "built link trees");

        for root in forest.roots().to_vec() {
            // Pruning only ever removes leaves.
            if forest.leaves(root).len() < options.min_link_count {
                continue;
            }
            forest.annotate_dates(doc, root);

            #[cfg(feature = "diagnostics")]
            trace!(tree = %forest.dump(root), "annotated link tree");

            let Some(pruned) = prune(&mut forest, root, options) else {
                trace!(root = %forest.node(root).path, "nothing survived pruning");
                continue;
            };
            if let Some(block) = Block::from_tree(&forest, pruned) {
                trace!(
                    path = %block.link_path,
                    links = block.link_count,
                    score = block.score(),
                    "candidate block"
                );
                blocks.push(block);
            }
        }
    }

    let ranked = block::rank(blocks, options);
    debug!(candidates = ranked.len(), "ranked blocks");

    select(doc, ranked, options)
}

/// Pick the first candidate whose items are all dated, else the top one.
fn select<D: PathDocument>(doc: &D, ranked: Vec<Block>, options: &Options) -> CatalogResult {
    let mut top: Option<(StructuralPath, Vec<CatalogItem>)> = None;

    for block in ranked {
        let items = materialize(doc, &block.link_path, options);
        if !items.is_empty() && items.iter().all(|item| item.has_date) {
            debug!(pattern = %block.link_path, items = items.len(), "selected dated block");
            return CatalogResult {
                items,
                pattern: Some(block.link_path.to_string()),
            };
        }
        if top.is_none() {
            top = Some((block.link_path, items));
        }
    }

    match top {
        Some((pattern, items)) => {
            debug!(%pattern, items = items.len(), "selected top block");
            CatalogResult {
                items,
                pattern: Some(pattern.to_string()),
            }
        }
        None => {
            debug!("no catalog found");
            CatalogResult::default()
        }
    }
}

/// Materialize the catalog of `doc` using a saved pattern.
pub(crate) fn replay<D: PathDocument>(doc: &D, pattern: &StructuralPath, options: &Options) -> Vec<CatalogItem> {
    let items = materialize(doc, pattern, options);
    debug!(%pattern, items = items.len(), "replayed pattern");
    items
}
