//! Link trees.
//!
//! A link tree is the nested container structure inferred from a group of
//! same-shape links. Leaves are the anchors themselves; internal nodes are
//! the repeating containers (list, row, cell) reconstructed from how the
//! positional indices of consecutive links advance.
//!
//! Nodes live in an arena ([`LinkForest`]) and refer to each other by
//! [`NodeId`]. `children` lists own their nodes, `parent` is a plain
//! back-reference. Every reparenting goes through [`LinkForest::detach`]
//! before [`LinkForest::attach_at`], so a node is never listed by two
//! parents.
//!
//! ## Continuity
//!
//! The children of a node at depth `k` are ordered by the positional index
//! of their segment at position `k`, and those indices run 1, 2, 3, ...
//! without gaps. The builder only ever extends a container with the
//! immediate successor of its last child; anything else starts a new tree.

use crate::date::extract_raw_date;
use crate::dom::PathDocument;
use crate::links::Link;
use crate::path::StructuralPath;

/// Index of a node in its [`LinkForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One node of a link tree.
#[derive(Debug, Clone)]
pub struct LinkTreeNode {
    /// Full structural path of the element this node stands for.
    pub path: StructuralPath,
    /// The anchor, on leaves only.
    pub link: Option<Link>,
    /// Date-like string found in the element's rendered text.
    pub published_raw: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl LinkTreeNode {
    /// Segment count of `path`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn has_date(&self) -> bool {
        self.published_raw.is_some()
    }

    /// Text length of the anchor, zero on internal nodes.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.link.as_ref().map_or(0, Link::text_len)
    }
}

/// Arena holding the trees built from one link group.
#[derive(Debug, Clone, Default)]
pub struct LinkForest {
    nodes: Vec<LinkTreeNode>,
    roots: Vec<NodeId>,
}

impl LinkForest {
    /// Build the trees for one group of same-shape links in document order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catalog_detect::links::Link;
    /// use catalog_detect::path::StructuralPath;
    /// use catalog_detect::tree::LinkForest;
    ///
    /// let links: Vec<Link> = (1..=3)
    ///     .map(|i| Link {
    ///         path: StructuralPath::parse(&format!("/html[1]/body[1]/ul[1]/li[{i}]/a[1]")).unwrap(),
    ///         url: format!("/story/{i}"),
    ///         text: format!("Story {i}"),
    ///     })
    ///     .collect();
    ///
    /// let forest = LinkForest::build(&links);
    /// assert_eq!(forest.roots().len(), 1);
    /// let root = forest.roots()[0];
    /// assert_eq!(forest.node(root).path.to_string(), "/html[1]/body[1]/ul[1]");
    /// assert_eq!(forest.leaves(root).len(), 3);
    /// ```
    #[must_use]
    pub fn build(links: &[Link]) -> Self {
        let mut forest = Self::default();
        let mut previous: Option<NodeId> = None;

        for link in links {
            let leaf = forest.add_node(link.path.clone(), Some(link.clone()));
            let joined = previous.is_some_and(|prev| forest.join(prev, leaf));
            if !joined {
                forest.roots.push(leaf);
            }
            previous = Some(leaf);
        }

        forest
    }

    /// Try to attach `leaf` to the structure containing `prev`.
    ///
    /// Returns false on a continuity break; the caller then roots a new tree
    /// at `leaf`.
    fn join(&mut self, prev: NodeId, leaf: NodeId) -> bool {
        let prev_path = &self.node(prev).path;
        let leaf_path = &self.node(leaf).path;
        let shared = prev_path.common_prefix_len(leaf_path);

        if shared >= prev_path.depth() || shared >= leaf_path.depth() {
            return false;
        }
        let (Some(prev_index), Some(leaf_index)) = (prev_path.index_at(shared), leaf_path.index_at(shared)) else {
            return false;
        };
        if prev_path.segments()[shared].tag != leaf_path.segments()[shared].tag || leaf_index != prev_index + 1 {
            return false;
        }

        // Climb to the topmost ancestor of `prev` still below the shared prefix.
        let mut top = prev;
        while let Some(parent) = self.node(top).parent {
            if self.node(parent).depth() > shared {
                top = parent;
            } else {
                break;
            }
        }

        let top_parent = self.node(top).parent;
        match top_parent {
            Some(parent) if self.node(parent).depth() == shared => {
                self.attach(parent, leaf);
                true
            }
            _ => {
                // Runs may start past index 1, e.g. after a header row.
                let container_path = leaf_path.prefix(shared);
                let container = self.add_node(container_path, None);
                self.replace(top, container);
                self.attach(container, top);
                self.attach(container, leaf);
                true
            }
        }
    }

    fn add_node(&mut self, path: StructuralPath, link: Option<Link>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(LinkTreeNode {
            path,
            link,
            published_raw: None,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Roots of the trees, in document order of their first leaf.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &LinkTreeNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut LinkTreeNode {
        &mut self.nodes[id.0]
    }

    /// Remove `id` from its parent's child list.
    ///
    /// Returns the position it occupied, or `None` if it had no parent.
    pub fn detach(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.nodes[id.0].parent.take()?;
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.remove(pos);
        Some(pos)
    }

    /// Insert `child` into `parent`'s child list at `pos`.
    ///
    /// `child` is detached from its current parent first.
    pub fn attach_at(&mut self, parent: NodeId, pos: usize, child: NodeId) {
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = pos.min(siblings.len());
        siblings.insert(pos, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Append `child` to `parent`'s child list.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let pos = self.nodes[parent.0].children.len();
        self.attach_at(parent, pos, child);
    }

    /// Put `new` where `old` is: in its parent's child list, or in the root list.
    fn replace(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old.0].parent;
        match (parent, self.detach(old)) {
            (Some(parent), Some(pos)) => self.attach_at(parent, pos, new),
            _ => {
                if let Some(slot) = self.roots.iter_mut().find(|r| **r == old) {
                    *slot = new;
                }
            }
        }
    }

    /// `root` and all its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev());
        }
        out
    }

    /// Leaves below `root` in document order.
    #[must_use]
    pub fn leaves(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// Store the raw publish date of every node below `root`.
    ///
    /// Each node's path is re-queried against the live document and the
    /// date is read from the element's rendered text.
    pub fn annotate_dates<D: PathDocument>(&mut self, doc: &D, root: NodeId) {
        for id in self.descendants(root) {
            let text = doc
                .select_first(&self.nodes[id.0].path)
                .map(|node| doc.inner_text(node))
                .unwrap_or_default();
            self.nodes[id.0].published_raw = extract_raw_date(&text);
        }
    }

    /// Collapse useless wrappers below `root`.
    ///
    /// Internal nodes left with a single child are spliced out (the child
    /// takes their place), internal nodes left without children are
    /// detached. `root` itself and leaves are never removed. Idempotent.
    pub fn simplify(&mut self, root: NodeId) {
        let children = self.nodes[root.0].children.clone();
        for child in children {
            self.simplify_below(child);
        }
    }

    fn simplify_below(&mut self, id: NodeId) {
        if self.nodes[id.0].link.is_some() {
            return;
        }
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.simplify_below(child);
        }

        let remaining = self.nodes[id.0].children.clone();
        match remaining.as_slice() {
            [] => {
                self.detach(id);
            }
            [only] => {
                let only = *only;
                let parent = self.nodes[id.0].parent;
                if let (Some(parent), Some(pos)) = (parent, self.detach(id)) {
                    self.detach(only);
                    self.attach_at(parent, pos, only);
                }
            }
            _ => {}
        }
    }

    /// Human-readable dump of the tree below `root`.
    #[cfg(feature = "diagnostics")]
    #[must_use]
    pub fn dump(&self, root: NodeId) -> String {
        fn walk(forest: &LinkForest, id: NodeId, level: usize, out: &mut String) {
            use std::fmt::Write;

            let node = forest.node(id);
            let _ = write!(out, "{:indent$}{}", "", node.path, indent = level * 2);
            if let Some(ref raw) = node.published_raw {
                let _ = write!(out, " [{raw}]");
            }
            if let Some(ref link) = node.link {
                let _ = write!(out, " -> {} {:?}", link.url, link.text);
            }
            out.push('\n');
            for child in node.children() {
                walk(forest, *child, level + 1, out);
            }
        }

        let mut out = String::new();
        walk(self, root, 0, &mut out);
        out
    }
}
