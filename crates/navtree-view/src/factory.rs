//! Node construction.

use std::sync::Arc;

use navtree_model::TreeEntry;

use crate::glyph::Glyph;
use crate::node::{NavTree, NodeId, TreeNode};
use crate::surface::{LabelAction, RenderSurface, RowSpec};

/// Builds live nodes and their rows from model entries.
#[derive(Clone, Debug)]
pub struct NodeFactory {
    relpath: String,
}

impl NodeFactory {
    /// Create a factory resolving links and icons against `relpath`.
    pub fn new(relpath: impl Into<String>) -> Self {
        Self {
            relpath: relpath.into(),
        }
    }

    /// Relative path prefix of the hosting page.
    #[must_use]
    pub fn relpath(&self) -> &str {
        &self.relpath
    }

    /// Resolve a model link against the relative path prefix.
    #[must_use]
    pub fn href(&self, link: &str) -> String {
        format!("{}{link}", self.relpath)
    }

    /// Create a node for `entry` under `parent` and build its row.
    ///
    /// The node is appended to `parent`'s children. Its row gets one
    /// indentation glyph per ancestor below the root and a connector glyph
    /// chosen from `is_last_sibling` and whether the entry has children.
    pub fn create_node<S: RenderSurface>(
        &self,
        tree: &mut NavTree,
        surface: &mut S,
        parent: NodeId,
        entry: &TreeEntry,
        is_last_sibling: bool,
    ) -> NodeId {
        let node = TreeNode {
            label: entry.label().to_owned(),
            link: entry.link().map(str::to_owned),
            parent: Some(parent),
            children: Vec::new(),
            child_model: entry.children().map(Arc::clone),
            materialized: false,
            expanded: false,
            depth: tree[parent].depth + 1,
            is_last_sibling,
        };
        let id = tree.push_child(node);

        let row = self.row_spec(tree, id);
        surface.create_row(id, parent, &row);
        id
    }

    fn row_spec(&self, tree: &NavTree, id: NodeId) -> RowSpec {
        let node = &tree[id];
        let indent = tree
            .ancestors(id)
            .into_iter()
            .map(|ancestor| Glyph::indent(tree[ancestor].is_last_sibling).icon(&self.relpath))
            .collect();
        let connector =
            Glyph::connector(node.is_last_sibling, node.is_expandable(), false).icon(&self.relpath);

        let action = match &node.link {
            Some(link) => LabelAction::Navigate(self.href(link)),
            None if node.is_expandable() => LabelAction::Toggle,
            None => LabelAction::None,
        };

        RowSpec {
            label: node.label.clone(),
            depth: node.depth,
            indent,
            connector,
            toggles: node.is_expandable(),
            action,
        }
    }
}
