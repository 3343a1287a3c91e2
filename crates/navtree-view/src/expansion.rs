//! Expand/collapse state machine.
//!
//! A node moves from unmaterialized to expanded on its first expansion,
//! building its children exactly once. After that it alternates between
//! collapsed and expanded. Collapsing only hides the children.

use std::sync::Arc;

use crate::factory::NodeFactory;
use crate::glyph::Glyph;
use crate::node::{NavTree, NodeId};
use crate::surface::{RenderSurface, Reveal};

/// Direction of a pending visibility transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    SlideDown,
    SlideUp,
}

/// Visibility transition awaiting completion from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub node: NodeId,
    pub kind: TransitionKind,
}

/// Result of an expansion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed: leaf, root, or already in the requested state.
    Ignored,
    Collapsed,
    /// Children are visible now.
    Expanded,
    /// Children are being revealed by a transition.
    Pending,
}

/// Drives expansion and lazy materialization of nodes.
#[derive(Debug)]
pub struct ExpansionController {
    factory: NodeFactory,
    animate: bool,
    pending: Vec<Transition>,
}

impl ExpansionController {
    /// Create a controller. With `animate` off, every change is immediate.
    #[must_use]
    pub fn new(factory: NodeFactory, animate: bool) -> Self {
        Self {
            factory,
            animate,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    /// Transitions scheduled and not yet reported finished.
    #[must_use]
    pub fn pending(&self) -> &[Transition] {
        &self.pending
    }

    /// Collapse an expanded node, expand anything else.
    pub fn toggle<S: RenderSurface>(
        &mut self,
        tree: &mut NavTree,
        surface: &mut S,
        id: NodeId,
    ) -> Outcome {
        match tree.get(id) {
            Some(node) if node.expanded => self.collapse(tree, surface, id),
            Some(_) => self.expand(tree, surface, id, false),
            None => Outcome::Ignored,
        }
    }

    /// Expand a node, materializing its children on first use.
    ///
    /// With `immediate` set, or with animation disabled, the children are
    /// shown at once. Otherwise a slide-down transition is scheduled.
    pub fn expand<S: RenderSurface>(
        &mut self,
        tree: &mut NavTree,
        surface: &mut S,
        id: NodeId,
        immediate: bool,
    ) -> Outcome {
        let Some(node) = tree.get(id) else {
            return Outcome::Ignored;
        };
        if id == NodeId::ROOT || !node.is_expandable() || node.expanded {
            return Outcome::Ignored;
        }
        let is_last = node.is_last_sibling;

        if !node.materialized {
            self.materialize(tree, surface, id);
        }

        let icon = Glyph::connector(is_last, true, true).icon(self.factory.relpath());
        surface.set_connector(id, &icon);
        tree.node_mut(id).expanded = true;

        if immediate || !self.animate {
            self.cancel(id);
            surface.show_children(id, Reveal::Immediate);
            Outcome::Expanded
        } else {
            surface.show_children(id, Reveal::Animated);
            self.schedule(id, TransitionKind::SlideDown);
            Outcome::Pending
        }
    }

    /// Hide the children of an expanded node.
    pub fn collapse<S: RenderSurface>(
        &mut self,
        tree: &mut NavTree,
        surface: &mut S,
        id: NodeId,
    ) -> Outcome {
        let Some(node) = tree.get(id) else {
            return Outcome::Ignored;
        };
        if id == NodeId::ROOT || !node.expanded {
            return Outcome::Ignored;
        }
        let is_last = node.is_last_sibling;

        if self.animate {
            surface.hide_children(id, Reveal::Animated);
            self.schedule(id, TransitionKind::SlideUp);
        } else {
            self.cancel(id);
            surface.hide_children(id, Reveal::Immediate);
        }

        let icon = Glyph::connector(is_last, true, false).icon(self.factory.relpath());
        surface.set_connector(id, &icon);
        tree.node_mut(id).expanded = false;
        Outcome::Collapsed
    }

    /// Build the children of `id` from its model entries.
    ///
    /// Does nothing once the node is materialized. Only the final entry is
    /// marked as the last sibling.
    pub fn materialize<S: RenderSurface>(
        &self,
        tree: &mut NavTree,
        surface: &mut S,
        id: NodeId,
    ) {
        let Some(node) = tree.get(id) else {
            return;
        };
        if node.materialized {
            return;
        }
        let Some(entries) = node.child_model.as_ref().map(Arc::clone) else {
            return;
        };

        let last = entries.len().saturating_sub(1);
        for (index, entry) in entries.iter().enumerate() {
            self.factory
                .create_node(tree, surface, id, entry, index == last);
        }
        tree.node_mut(id).materialized = true;
        tracing::debug!(node = id.index(), children = entries.len(), "Materialized node");
    }

    /// Record that the host finished the transition for `id`.
    ///
    /// Returns the kind of the transition that was pending, or `None` if the
    /// report is stale (superseded or never scheduled).
    pub fn finish(&mut self, id: NodeId) -> Option<TransitionKind> {
        let position = self.pending.iter().position(|t| t.node == id)?;
        Some(self.pending.remove(position).kind)
    }

    /// Schedule a transition, replacing any pending one for the same node.
    fn schedule(&mut self, node: NodeId, kind: TransitionKind) {
        self.cancel(node);
        self.pending.push(Transition { node, kind });
    }

    fn cancel(&mut self, node: NodeId) {
        self.pending.retain(|t| t.node != node);
    }
}
