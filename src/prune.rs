//! Noise pruning.
//!
//! A link tree usually covers more than the article links: thumbnails,
//! comment counters, author and category links repeat once per row just
//! like the titles do. Pruning narrows the tree to the most date-dense
//! subtree, splits its leaves into columns (one column per position inside
//! a row) and drops the columns that do not look like the primary article
//! link.
//!
//! Pruning is best-effort: whenever the evidence is insufficient the tree
//! is returned untouched.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::tree::{LinkForest, NodeId};
use crate::Options;

/// Prune the tree below `root`.
///
/// Returns the root of the pruned tree, which may be a descendant of
/// `root`, or `None` when nothing survives.
pub fn prune(forest: &mut LinkForest, root: NodeId, options: &Options) -> Option<NodeId> {
    let Some(dated_root) = find_dated_root(forest, root) else {
        return Some(root);
    };

    let dated = forest
        .descendants(dated_root)
        .into_iter()
        .filter(|id| *id != dated_root && forest.node(*id).has_date())
        .count();
    if dated < options.min_link_count {
        debug!(dated, root = %forest.node(dated_root).path, "too few dated nodes, skipping pruning");
        return Some(root);
    }

    let row_depth = forest.node(dated_root).depth() + 1;
    let mut columns = split_columns(forest, dated_root, row_depth);

    if columns.len() > 1 {
        if columns.iter().any(|c| c.fully_dated(forest)) {
            columns.retain(|c| c.fully_dated(forest));
        }
        columns.retain(|c| c.avg_text_len(forest) >= options.min_text_len as f64);
        columns = drop_duplicate_columns(forest, columns);
    }

    if columns.is_empty() {
        debug!(root = %forest.node(dated_root).path, "every column pruned, keeping tree as is");
        return Some(root);
    }

    let kept: HashSet<NodeId> = columns.iter().flat_map(|c| c.leaves.iter().copied()).collect();
    debug!(
        root = %forest.node(dated_root).path,
        columns = ?columns.iter().map(|c| c.key.as_str()).collect::<Vec<_>>(),
        "pruned link tree"
    );

    forest.detach(dated_root);
    for leaf in forest.leaves(dated_root) {
        if !kept.contains(&leaf) {
            forest.detach(leaf);
        }
    }
    forest.simplify(dated_root);

    let node = forest.node(dated_root);
    if node.is_leaf() && node.link.is_none() {
        return None;
    }
    Some(dated_root)
}

/// Number of consecutive fully-dated levels below `id`.
///
/// Zero when `id` is a leaf or any of its children lacks a date; otherwise
/// one more than the least-dated child.
fn dated_levels(forest: &LinkForest, id: NodeId) -> usize {
    let node = forest.node(id);
    if node.is_leaf() || !node.children().iter().all(|c| forest.node(*c).has_date()) {
        return 0;
    }
    1 + node
        .children()
        .iter()
        .map(|c| dated_levels(forest, *c))
        .min()
        .unwrap_or(0)
}

/// The dated internal node with the most fully-dated levels below it.
///
/// Ties go to the node met first in pre-order, i.e. the outermost one.
fn find_dated_root(forest: &LinkForest, root: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, usize)> = None;

    for id in forest.descendants(root) {
        let node = forest.node(id);
        if node.is_leaf() || !node.has_date() {
            continue;
        }
        let levels = dated_levels(forest, id);
        if levels > 0 && best.is_none_or(|(_, b)| levels > b) {
            best = Some((id, levels));
        }
    }

    best.map(|(id, _)| id)
}

/// Leaves sharing one position inside a row.
#[derive(Debug)]
struct Column {
    /// Path suffix below the row, e.g. `/div[1]/a[2]`.
    key: String,
    leaves: Vec<NodeId>,
}

impl Column {
    fn fully_dated(&self, forest: &LinkForest) -> bool {
        self.leaves.iter().all(|l| forest.node(*l).has_date())
    }

    fn avg_text_len(&self, forest: &LinkForest) -> f64 {
        if self.leaves.is_empty() {
            return 0.0;
        }
        let total: usize = self.leaves.iter().map(|l| forest.node(*l).text_len()).sum();
        total as f64 / self.leaves.len() as f64
    }

    fn urls<'a>(&self, forest: &'a LinkForest) -> HashSet<&'a str> {
        self.leaves
            .iter()
            .filter_map(|l| forest.node(*l).link.as_ref())
            .map(|link| link.url.as_str())
            .collect()
    }
}

fn split_columns(forest: &LinkForest, root: NodeId, row_depth: usize) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();

    for leaf in forest.leaves(root) {
        let key = forest.node(leaf).path.suffix(row_depth).to_string();
        match columns.iter_mut().find(|c| c.key == key) {
            Some(column) => column.leaves.push(leaf),
            None => columns.push(Column { key, leaves: vec![leaf] }),
        }
    }

    columns
}

/// Among columns linking to the same URLs as another column, keep the one
/// with the shortest average text.
fn drop_duplicate_columns(forest: &LinkForest, columns: Vec<Column>) -> Vec<Column> {
    let url_sets: Vec<HashSet<&str>> = columns.iter().map(|c| c.urls(forest)).collect();
    let duplicated: Vec<usize> = (0..columns.len())
        .filter(|&i| (0..columns.len()).any(|j| j != i && !url_sets[i].is_disjoint(&url_sets[j])))
        .collect();

    let Some(keep) = duplicated.iter().copied().min_by(|a, b| {
        columns[*a]
            .avg_text_len(forest)
            .partial_cmp(&columns[*b].avg_text_len(forest))
            .unwrap_or(Ordering::Equal)
    }) else {
        return columns;
    };

    columns
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i == keep || !duplicated.contains(i))
        .map(|(_, c)| c)
        .collect()
}
