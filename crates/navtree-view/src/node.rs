//! Live tree nodes.
//!
//! Nodes are stored in a flat arena with parent/children relationships
//! tracked by [`NodeId`]. The parent link is a plain index, used for depth
//! and ancestor walks. Ownership runs only from the arena.

use std::ops::Index;
use std::sync::Arc;

use navtree_model::TreeEntry;

/// Identity of a node in a [`NavTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root. It has no row of its own.
    pub const ROOT: Self = Self(0);

    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Expansion state of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpansionState {
    /// No child entries. Never expands.
    Leaf,
    /// Has child entries that have not been built yet.
    Unmaterialized,
    Collapsed,
    Expanded,
}

/// Runtime node mirroring one model entry plus presentation state.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub(crate) label: String,
    pub(crate) link: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) child_model: Option<Arc<[TreeEntry]>>,
    pub(crate) materialized: bool,
    pub(crate) expanded: bool,
    pub(crate) depth: usize,
    pub(crate) is_last_sibling: bool,
}

impl TreeNode {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Parent node, `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children built so far, in display order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True once the children have been built from the model.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True if the node has child entries.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.child_model.is_some()
    }

    /// True for a node whose click toggles expansion instead of navigating.
    #[must_use]
    pub fn is_grouping(&self) -> bool {
        self.link.is_none() && self.is_expandable()
    }

    /// Distance from the root. The root is 0, first-level nodes are 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn is_last_sibling(&self) -> bool {
        self.is_last_sibling
    }

    #[must_use]
    pub fn state(&self) -> ExpansionState {
        if !self.is_expandable() {
            ExpansionState::Leaf
        } else if !self.materialized {
            ExpansionState::Unmaterialized
        } else if self.expanded {
            ExpansionState::Expanded
        } else {
            ExpansionState::Collapsed
        }
    }

    /// Number of child entries in the model, 0 for leaves.
    #[must_use]
    pub fn child_entry_count(&self) -> usize {
        self.child_model.as_ref().map_or(0, |entries| entries.len())
    }
}

/// Arena of live nodes rooted at a synthetic root.
#[derive(Debug)]
pub struct NavTree {
    nodes: Vec<TreeNode>,
    selected: Option<NodeId>,
}

impl NavTree {
    /// Create a tree holding only the root, bound to the top-level entries.
    #[must_use]
    pub(crate) fn with_root(entries: Arc<[TreeEntry]>) -> Self {
        let root = TreeNode {
            label: String::new(),
            link: None,
            parent: None,
            children: Vec::new(),
            child_model: Some(entries),
            materialized: false,
            expanded: false,
            depth: 0,
            is_last_sibling: true,
        };
        Self {
            nodes: vec![root],
            selected: None,
        }
    }

    /// Get a node, `None` if the id does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes built so far, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node under `parent` and return its id.
    pub(crate) fn push_child(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = node.parent.unwrap_or(NodeId::ROOT);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Ancestors of `id` below the root, outermost first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(TreeNode::parent);
        while let Some(ancestor) = current {
            if ancestor == NodeId::ROOT {
                break;
            }
            chain.push(ancestor);
            current = self.nodes[ancestor.0].parent;
        }
        chain.reverse();
        chain
    }

    /// Follow built children from the root along an index path.
    #[must_use]
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter().try_fold(NodeId::ROOT, |current, &index| {
            self.get(current)?.children.get(index).copied()
        })
    }

    /// Currently selected node.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Select `id` and return the previously selected node.
    pub(crate) fn select(&mut self, id: NodeId) -> Option<NodeId> {
        self.selected.replace(id).filter(|&previous| previous != id)
    }

    /// Rows currently visible, in display order.
    ///
    /// First-level nodes are always visible. Deeper nodes are visible when
    /// every ancestor is expanded.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<NodeId> {
        fn walk(tree: &NavTree, id: NodeId, rows: &mut Vec<NodeId>) {
            for &child in &tree.nodes[id.0].children {
                rows.push(child);
                if tree.nodes[child.0].expanded {
                    walk(tree, child, rows);
                }
            }
        }

        let mut rows = Vec::new();
        walk(self, NodeId::ROOT, &mut rows);
        rows
    }
}

impl Index<NodeId> for NavTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}
