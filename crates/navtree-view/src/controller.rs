//! Tree startup and event dispatch.
//!
//! [`TreeController::init`] builds the first level, opens the path to the
//! current page and selects it. Afterwards all interaction goes through
//! [`TreeController::handle`], keyed by [`NodeId`].

use std::sync::Arc;

use navtree_model::{DEFAULT_FALLBACK_PAGE, TreeModel};

use crate::expansion::{ExpansionController, Outcome, Transition, TransitionKind};
use crate::factory::NodeFactory;
use crate::node::{NavTree, NodeId};
use crate::surface::RenderSurface;

/// Visible page geometry used to center the selected row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Total window height.
    pub height: f64,
    /// Height of the header chrome above the tree.
    pub header_height: f64,
    /// Height of the footer chrome below the tree.
    pub footer_height: f64,
}

impl Viewport {
    /// Vertical space left for the tree.
    #[must_use]
    pub fn available_height(&self) -> f64 {
        (self.height - self.header_height - self.footer_height).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            height: 800.0,
            header_height: 0.0,
            footer_height: 0.0,
        }
    }
}

/// Startup options for [`TreeController::init`].
#[derive(Clone, Debug)]
pub struct TreeOptions {
    /// Page selected when the current page is not in the tree.
    pub fallback_page: String,
    /// Animate user-driven expand and collapse.
    pub animate: bool,
    /// Geometry assumed until the host reports the real one.
    pub viewport: Viewport,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            fallback_page: DEFAULT_FALLBACK_PAGE.to_owned(),
            animate: true,
            viewport: Viewport::default(),
        }
    }
}

/// Input from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TreeEvent {
    /// The connector glyph of a row was clicked.
    ToggleClicked(NodeId),
    /// The label of a row was clicked.
    LabelClicked(NodeId),
    /// A show/hide transition started by the tree completed.
    TransitionFinished(NodeId),
    /// The hosting page finished loading.
    PageLoaded(Viewport),
}

/// Request back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// Load the page at this href.
    Navigate(String),
}

/// Owns the live tree and drives it from host events.
#[derive(Debug)]
pub struct TreeController<S> {
    model: TreeModel,
    tree: NavTree,
    surface: S,
    expansion: ExpansionController,
    viewport: Viewport,
    reveal_on_load: bool,
}

impl<S: RenderSurface> TreeController<S> {
    /// Build the tree for `current_page`.
    ///
    /// Materializes the first level, locates `current_page` (or the
    /// fallback page), expands every node on the path without animation and
    /// selects the final one. The selected row is revealed when the host
    /// reports [`TreeEvent::PageLoaded`]. When neither page is found the
    /// tree shows only its first level and nothing is selected.
    pub fn init(
        model: TreeModel,
        surface: S,
        current_page: &str,
        relpath: &str,
        options: TreeOptions,
    ) -> Self {
        let tree = NavTree::with_root(Arc::clone(model.entries()));
        let expansion = ExpansionController::new(NodeFactory::new(relpath), options.animate);
        let mut controller = Self {
            model,
            tree,
            surface,
            expansion,
            viewport: options.viewport,
            reveal_on_load: false,
        };

        controller
            .expansion
            .materialize(&mut controller.tree, &mut controller.surface, NodeId::ROOT);
        controller.tree.node_mut(NodeId::ROOT).expanded = true;

        let location = controller
            .model
            .locate_or_fallback(current_page, &options.fallback_page);
        match location {
            Some(location) => {
                tracing::debug!(
                    page = current_page,
                    path = ?location.path,
                    fallback = location.fallback,
                    "Opening tree at page"
                );
                if let Some(selected) = controller.open_path(&location.path) {
                    controller.select(selected);
                    controller.reveal_on_load = true;
                }
            }
            None => {
                tracing::info!(page = current_page, "No tree entry for page, nothing selected");
            }
        }

        controller
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: TreeEvent) -> Option<TreeAction> {
        match event {
            TreeEvent::ToggleClicked(id) => {
                self.toggle(id);
                None
            }
            TreeEvent::LabelClicked(id) => {
                let node = self.tree.get(id)?;
                if let Some(link) = node.link() {
                    return Some(TreeAction::Navigate(self.expansion.factory().href(link)));
                }
                if node.is_expandable() {
                    self.toggle(id);
                }
                None
            }
            TreeEvent::TransitionFinished(id) => {
                if self.expansion.finish(id) == Some(TransitionKind::SlideDown) {
                    self.reveal();
                }
                None
            }
            TreeEvent::PageLoaded(viewport) => {
                self.viewport = viewport;
                if std::mem::take(&mut self.reveal_on_load) {
                    self.reveal();
                }
                None
            }
        }
    }

    /// Scroll so the selected row sits in the middle of the available space.
    ///
    /// Returns the scroll offset, or `None` without a visible selection.
    pub fn reveal(&mut self) -> Option<f64> {
        let selected = self.tree.selected()?;
        let top = self.surface.row_top(selected)?;
        let scroll_top = (top - self.viewport.available_height() / 2.0).max(0.0);
        self.surface.scroll_to(scroll_top);
        Some(scroll_top)
    }

    #[must_use]
    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.tree.selected()
    }

    /// Transitions the host has not reported finished yet.
    #[must_use]
    pub fn pending_transitions(&self) -> &[Transition] {
        self.expansion.pending()
    }

    /// True while the reveal waits for [`TreeEvent::PageLoaded`].
    #[must_use]
    pub fn reveal_scheduled(&self) -> bool {
        self.reveal_on_load
    }

    fn toggle(&mut self, id: NodeId) {
        let outcome = self
            .expansion
            .toggle(&mut self.tree, &mut self.surface, id);
        // Without animation there is no transition to wait for.
        if outcome == Outcome::Expanded {
            self.reveal();
        }
    }

    /// Expand every node along `path` and return the final one.
    fn open_path(&mut self, path: &[usize]) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for &index in path {
            let Some(&child) = self.tree[current].children().get(index) else {
                tracing::warn!(?path, index, "Tree path does not match built nodes");
                return None;
            };
            self.expansion
                .expand(&mut self.tree, &mut self.surface, child, true);
            current = child;
        }
        (current != NodeId::ROOT).then_some(current)
    }

    fn select(&mut self, id: NodeId) {
        if let Some(previous) = self.tree.select(id) {
            self.surface.mark_selected(previous, false);
        }
        self.surface.mark_selected(id, true);
    }
}

#[cfg(test)]
mod tests {
    use navtree_model::TreeEntry;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::glyph::Glyph;
    use crate::html::HtmlSurface;
    use crate::node::ExpansionState;

    /// ```text
    /// Project (index.html)
    /// ├─ Main Page (index.html)
    /// ├─ Classes (annotated.html)
    /// │  ├─ Atom (class_atom.html)
    /// │  └─ Point (class_point.html)
    /// └─ Files (no link)
    ///    └─ surface.h (surface_8h.html)
    /// ```
    fn model() -> TreeModel {
        TreeModel::new(vec![TreeEntry::branch(
            "Project",
            Some("index.html"),
            vec![
                TreeEntry::leaf("Main Page", Some("index.html")),
                TreeEntry::branch(
                    "Classes",
                    Some("annotated.html"),
                    vec![
                        TreeEntry::leaf("Atom", Some("class_atom.html")),
                        TreeEntry::leaf("Point", Some("class_point.html")),
                    ],
                ),
                TreeEntry::branch(
                    "Files",
                    None,
                    vec![TreeEntry::leaf("surface.h", Some("surface_8h.html"))],
                ),
            ],
        )])
    }

    fn options(animate: bool) -> TreeOptions {
        TreeOptions {
            animate,
            viewport: Viewport {
                height: 100.0,
                header_height: 10.0,
                footer_height: 10.0,
            },
            ..TreeOptions::default()
        }
    }

    fn init(page: &str) -> TreeController<HtmlSurface> {
        TreeController::init(
            model(),
            HtmlSurface::new("nav-tree-contents", 10.0),
            page,
            "",
            options(true),
        )
    }

    fn expansion_snapshot(controller: &TreeController<HtmlSurface>) -> Vec<(String, bool)> {
        controller
            .tree()
            .visible_rows()
            .into_iter()
            .map(|id| {
                let node = &controller.tree()[id];
                (node.label().to_owned(), node.is_expanded())
            })
            .collect()
    }

    #[test]
    fn test_init_expands_path_to_current_page() {
        let controller = init("class_point.html");
        let tree = controller.tree();

        let selected = controller.selected().unwrap();
        assert_eq!(tree[selected].label(), "Point");
        assert_eq!(tree.node_at_path(&[0, 1, 1]), Some(selected));

        let project = tree.node_at_path(&[0]).unwrap();
        let classes = tree.node_at_path(&[0, 1]).unwrap();
        let files = tree.node_at_path(&[0, 2]).unwrap();
        assert!(tree[project].is_expanded());
        assert!(tree[classes].is_expanded());
        assert_eq!(tree[files].state(), ExpansionState::Unmaterialized);
        assert!(controller.pending_transitions().is_empty());
    }

    #[test]
    fn test_init_builds_only_opened_branches() {
        let controller = init("class_atom.html");

        // root, Project, its 3 children, Classes' 2 children
        assert_eq!(controller.tree().len(), 7);
    }

    #[test]
    fn test_fallback_on_miss_matches_index() {
        let missing = init("missing.html");
        let index = init("index.html");

        assert_eq!(expansion_snapshot(&missing), expansion_snapshot(&index));
        assert_eq!(missing.selected(), index.selected());
        assert_eq!(missing.tree()[missing.selected().unwrap()].label(), "Project");
    }

    #[test]
    fn test_no_selection_when_fallback_missing() {
        let model = TreeModel::new(vec![
            TreeEntry::leaf("A", Some("a.html")),
            TreeEntry::branch("B", None, vec![TreeEntry::leaf("C", Some("c.html"))]),
        ]);
        let mut controller = TreeController::init(
            model,
            HtmlSurface::default(),
            "missing.html",
            "",
            options(true),
        );

        assert_eq!(controller.selected(), None);
        assert_eq!(controller.tree().visible_rows().len(), 2);
        assert!(!controller.reveal_scheduled());
        assert_eq!(controller.reveal(), None);
    }

    #[test]
    fn test_empty_model_renders_nothing() {
        let controller = TreeController::init(
            TreeModel::new(Vec::new()),
            HtmlSurface::default(),
            "index.html",
            "",
            TreeOptions::default(),
        );

        assert_eq!(controller.tree().len(), 1);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn test_single_selection_after_init() {
        let controller = init("surface_8h.html");
        let html = controller.surface().render_html();

        assert_eq!(html.matches("id=\"selected\"").count(), 1);
        assert!(controller.selected().is_some());
    }

    #[test]
    fn test_page_load_reveals_selected_row() {
        let mut controller = init("class_point.html");
        assert!(controller.reveal_scheduled());
        assert_eq!(controller.surface().scroll_top(), None);

        controller.handle(TreeEvent::PageLoaded(Viewport {
            height: 60.0,
            header_height: 10.0,
            footer_height: 10.0,
        }));

        // Visible rows: Project, Main Page, Classes, Atom, Point → Point at 40.
        // Available height 40, so the row is centered at 40 - 20.
        assert_eq!(controller.surface().scroll_top(), Some(20.0));
        assert!(!controller.reveal_scheduled());
    }

    #[test]
    fn test_reveal_clamps_at_top() {
        let mut controller = init("index.html");

        assert_eq!(controller.reveal(), Some(0.0));
    }

    #[test]
    fn test_label_click_on_link_navigates() {
        let mut controller = TreeController::init(
            model(),
            HtmlSurface::default(),
            "index.html",
            "../",
            options(true),
        );
        let classes = controller.tree().node_at_path(&[0, 1]).unwrap();

        let action = controller.handle(TreeEvent::LabelClicked(classes));

        assert_eq!(
            action,
            Some(TreeAction::Navigate("../annotated.html".to_owned()))
        );
        assert!(!controller.tree()[classes].is_expanded());
    }

    #[test]
    fn test_label_click_on_grouping_node_toggles() {
        let mut controller = init("index.html");
        let files = controller.tree().node_at_path(&[0, 2]).unwrap();

        assert_eq!(controller.handle(TreeEvent::LabelClicked(files)), None);
        assert!(controller.tree()[files].is_expanded());

        controller.handle(TreeEvent::LabelClicked(files));
        assert!(!controller.tree()[files].is_expanded());
    }

    #[test]
    fn test_slide_down_completion_reveals_selection() {
        let mut controller = init("class_atom.html");
        let files = controller.tree().node_at_path(&[0, 2]).unwrap();

        controller.handle(TreeEvent::ToggleClicked(files));
        assert_eq!(controller.pending_transitions().len(), 1);
        assert_eq!(controller.surface().scroll_top(), None);

        controller.handle(TreeEvent::TransitionFinished(files));

        assert!(controller.pending_transitions().is_empty());
        assert!(controller.surface().scroll_top().is_some());
    }

    #[test]
    fn test_stale_transition_report_is_ignored() {
        let mut controller = init("class_atom.html");
        let files = controller.tree().node_at_path(&[0, 2]).unwrap();

        controller.handle(TreeEvent::ToggleClicked(files));
        controller.handle(TreeEvent::ToggleClicked(files));
        controller.handle(TreeEvent::TransitionFinished(files));
        controller.handle(TreeEvent::TransitionFinished(files));

        assert_eq!(controller.surface().scroll_top(), None);
        assert!(!controller.tree()[files].is_expanded());
    }

    #[test]
    fn test_unanimated_toggle_reveals_immediately() {
        let mut controller = TreeController::init(
            model(),
            HtmlSurface::new("nav-tree-contents", 10.0),
            "class_atom.html",
            "",
            options(false),
        );
        let files = controller.tree().node_at_path(&[0, 2]).unwrap();

        controller.handle(TreeEvent::ToggleClicked(files));

        assert!(controller.pending_transitions().is_empty());
        assert!(controller.surface().scroll_top().is_some());
        assert_eq!(controller.surface().animation_count(), 0);
    }

    #[test]
    fn test_events_for_unknown_nodes_are_ignored() {
        let mut controller = init("index.html");
        let before = controller.tree().len();

        assert_eq!(controller.handle(TreeEvent::LabelClicked(NodeId(999))), None);
        controller.handle(TreeEvent::ToggleClicked(NodeId(999)));
        controller.handle(TreeEvent::ToggleClicked(NodeId::ROOT));

        assert_eq!(controller.tree().len(), before);
    }

    #[test]
    fn test_last_sibling_glyphs() {
        let controller = init("index.html");
        let project = controller.tree().node_at_path(&[0]).unwrap();
        let children = controller.tree()[project].children().to_vec();
        let surface = controller.surface();

        let glyphs: Vec<_> = children.iter().map(|&id| surface.connector(id)).collect();

        assert_eq!(
            glyphs,
            vec![
                Some(Glyph::Node),
                Some(Glyph::PlusNode),
                Some(Glyph::PlusLastNode),
            ]
        );
        assert_eq!(surface.connector(project), Some(Glyph::MinusLastNode));
    }
}
