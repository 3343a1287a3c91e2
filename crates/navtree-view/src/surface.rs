//! Render surface seam.
//!
//! The tree engine never touches presentation directly. It describes rows
//! and visibility changes through [`RenderSurface`]; a host implements it on
//! top of whatever it renders to.

use crate::glyph::Icon;
use crate::node::NodeId;

/// What clicking a row's label does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelAction {
    /// Follow the link. Holds the resolved href.
    Navigate(String),
    /// Toggle expansion of a grouping node.
    Toggle,
    /// Plain text: leaf without a link.
    None,
}

/// Description of a newly created row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowSpec {
    pub label: String,
    pub depth: usize,
    /// One icon per ancestor below the root, outermost first.
    pub indent: Vec<Icon>,
    pub connector: Icon,
    /// True if clicking the connector toggles expansion.
    pub toggles: bool,
    pub action: LabelAction,
}

/// How a child container changes visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    Immediate,
    /// Brief transition. The host reports completion back to the controller.
    Animated,
}

/// Presentation backend driven by the tree engine.
pub trait RenderSurface {
    /// Create the row for `node` inside the child container of `parent`.
    ///
    /// The container is created on first use, hidden unless `parent` is the
    /// root.
    fn create_row(&mut self, node: NodeId, parent: NodeId, row: &RowSpec);

    /// Replace the connector icon of a row.
    fn set_connector(&mut self, node: NodeId, icon: &Icon);

    fn show_children(&mut self, node: NodeId, reveal: Reveal);

    fn hide_children(&mut self, node: NodeId, reveal: Reveal);

    /// Add or remove the selected marker on a row.
    fn mark_selected(&mut self, node: NodeId, selected: bool);

    /// Vertical offset of a row from the top of the tree container.
    ///
    /// Returns `None` if the row is unknown or hidden.
    fn row_top(&self, node: NodeId) -> Option<f64>;

    /// Scroll the tree container to `scroll_top`.
    fn scroll_to(&mut self, scroll_top: f64);
}
