//! Candidate blocks and their ranking.
//!
//! A block summarizes one pruned link tree: the generic path matching its
//! leaves plus the link statistics used for scoring.

use crate::path::StructuralPath;
use crate::tree::{LinkForest, NodeId};
use crate::Options;

/// Summary of one pruned link tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Path matching every leaf of the tree, with wildcards where rows vary.
    pub link_path: StructuralPath,
    /// Number of leaves.
    pub link_count: usize,
    /// Total characters of leaf link text.
    pub link_text_len: usize,
    /// Leaf URLs in document order.
    pub urls: Vec<String>,
}

impl Block {
    /// Summarize the tree rooted at `root`.
    ///
    /// Returns `None` for a tree without links, or when the leaves do not
    /// share one path shape.
    #[must_use]
    pub fn from_tree(forest: &LinkForest, root: NodeId) -> Option<Self> {
        let leaves = forest.leaves(root);
        let links: Vec<_> = leaves.iter().filter_map(|l| forest.node(*l).link.as_ref()).collect();
        if links.is_empty() {
            return None;
        }

        let link_path = StructuralPath::generic(links.iter().map(|l| &l.path))?;
        Some(Self {
            link_path,
            link_count: links.len(),
            link_text_len: links.iter().map(|l| l.text_len()).sum(),
            urls: links.iter().map(|l| l.url.clone()).collect(),
        })
    }

    /// Average characters per link.
    #[must_use]
    pub fn avg_text_len(&self) -> f64 {
        if self.link_count == 0 {
            return 0.0;
        }
        self.link_text_len as f64 / self.link_count as f64
    }

    /// Ranking score: the total link text, so more links and longer titles
    /// both count.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.link_text_len as f64
    }
}

/// Filter, sort and trim candidate blocks.
///
/// Blocks below the link-count or average-text thresholds are dropped, the
/// rest are sorted by descending score (stable, so document order breaks
/// ties), blocks repeating an earlier block's link path are removed, and
/// only blocks scoring above `score_threshold` times the best score are kept
/// next to the best one.
#[must_use]
pub fn rank(blocks: Vec<Block>, options: &Options) -> Vec<Block> {
    let mut blocks: Vec<Block> = blocks
        .into_iter()
        .filter(|b| b.link_count >= options.min_link_count && b.avg_text_len() >= options.min_text_len as f64)
        .collect();
    blocks.sort_by(|a, b| b.score().total_cmp(&a.score()));

    let mut ranked: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if ranked.iter().any(|r| r.link_path == block.link_path) {
            continue;
        }
        ranked.push(block);
    }

    let Some(top) = ranked.first().map(Block::score) else {
        return ranked;
    };
    let cutoff = top * options.score_threshold;
    let keep = 1 + ranked[1..].iter().take_while(|b| b.score() > cutoff).count();
    ranked.truncate(keep);
    ranked
}
