//! HTML render surface.
//!
//! Keeps an in-memory mirror of the tree markup and serializes it on
//! demand. The structure follows the classic documentation tree layout:
//!
//! ```text
//! <div id="nav-tree-contents">
//!   <ul>
//!     <li data-node="1">
//!       <div class="item"> <img>… <span class="label"><a>…</a></span> </div>
//!       <ul class="children_ul" style="display:none"> … </ul>
//!     </li>
//!   </ul>
//! </div>
//! ```
//!
//! Every row carries its node id in `data-node`, so a host can route all
//! clicks through one handler.

use std::fmt::Write;

use crate::glyph::{Glyph, Icon};
use crate::node::NodeId;
use crate::surface::{LabelAction, RenderSurface, Reveal, RowSpec};

/// Default id of the container the tree is mounted into.
pub const DEFAULT_MOUNT_ID: &str = "nav-tree-contents";

/// Default height of one row in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 22.0;

#[derive(Debug)]
struct Row {
    spec: RowSpec,
    connector: Icon,
    children: Vec<NodeId>,
    /// `None` until the first child is appended, then the visibility flag.
    container: Option<bool>,
    selected: bool,
}

/// Render surface producing static HTML.
#[derive(Debug)]
pub struct HtmlSurface {
    mount_id: String,
    row_height: f64,
    rows: Vec<Option<Row>>,
    top_level: Vec<NodeId>,
    scroll_top: Option<f64>,
    animations: usize,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_ID, DEFAULT_ROW_HEIGHT)
    }
}

impl HtmlSurface {
    #[must_use]
    pub fn new(mount_id: impl Into<String>, row_height: f64) -> Self {
        Self {
            mount_id: mount_id.into(),
            row_height,
            rows: Vec::new(),
            top_level: Vec::new(),
            scroll_top: None,
            animations: 0,
        }
    }

    /// Last requested scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> Option<f64> {
        self.scroll_top
    }

    /// Current connector glyph of a row.
    #[must_use]
    pub fn connector(&self, node: NodeId) -> Option<Glyph> {
        self.row(node).map(|row| row.connector.glyph)
    }

    /// True if the row's children container exists and is shown.
    #[must_use]
    pub fn children_visible(&self, node: NodeId) -> bool {
        self.row(node).and_then(|row| row.container) == Some(true)
    }

    /// Number of animated show/hide requests received.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.animations
    }

    /// Serialize the mount container with all rows built so far.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = String::with_capacity(4096);
        let _ = write!(html, "<div id=\"{}\"", escape(&self.mount_id));
        if let Some(scroll_top) = self.scroll_top {
            let _ = write!(html, " data-scroll-top=\"{scroll_top}\"");
        }
        html.push_str(">\n<ul>\n");
        self.render_rows(&mut html, &self.top_level);
        html.push_str("</ul>\n</div>\n");
        html
    }

    fn render_rows(&self, html: &mut String, ids: &[NodeId]) {
        for &id in ids {
            let Some(row) = self.row(id) else {
                continue;
            };
            let _ = writeln!(html, "<li data-node=\"{}\">", id.index());

            if row.selected {
                html.push_str("<div class=\"item selected\" id=\"selected\">");
            } else {
                html.push_str("<div class=\"item\">");
            }
            for icon in &row.spec.indent {
                push_img(html, icon);
            }
            if row.spec.toggles {
                html.push_str("<a class=\"toggle\" href=\"javascript:void(0)\">");
                push_img(html, &row.connector);
                html.push_str("</a>");
            } else {
                push_img(html, &row.connector);
            }

            html.push_str("<span class=\"label\">");
            match &row.spec.action {
                LabelAction::Navigate(href) => {
                    let _ = write!(
                        html,
                        "<a href=\"{}\">{}</a>",
                        escape(href),
                        escape(&row.spec.label)
                    );
                }
                LabelAction::Toggle => {
                    let _ = write!(
                        html,
                        "<a class=\"nolink\" href=\"javascript:void(0)\">{}</a>",
                        escape(&row.spec.label)
                    );
                }
                LabelAction::None => {
                    let _ = write!(html, "<a>{}</a>", escape(&row.spec.label));
                }
            }
            html.push_str("</span></div>\n");

            if let Some(visible) = row.container {
                if visible {
                    html.push_str("<ul class=\"children_ul\">\n");
                } else {
                    html.push_str("<ul class=\"children_ul\" style=\"display:none\">\n");
                }
                self.render_rows(html, &row.children);
                html.push_str("</ul>\n");
            }

            html.push_str("</li>\n");
        }
    }

    fn row(&self, node: NodeId) -> Option<&Row> {
        self.rows.get(node.index()).and_then(Option::as_ref)
    }

    fn row_mut(&mut self, node: NodeId) -> Option<&mut Row> {
        self.rows.get_mut(node.index()).and_then(Option::as_mut)
    }

    /// Visible rows in display order.
    fn visible(&self) -> Vec<NodeId> {
        fn walk(surface: &HtmlSurface, ids: &[NodeId], out: &mut Vec<NodeId>) {
            for &id in ids {
                let Some(row) = surface.row(id) else {
                    continue;
                };
                out.push(id);
                if row.container == Some(true) {
                    walk(surface, &row.children, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &self.top_level, &mut out);
        out
    }
}

impl RenderSurface for HtmlSurface {
    fn create_row(&mut self, node: NodeId, parent: NodeId, row: &RowSpec) {
        if parent == NodeId::ROOT {
            self.top_level.push(node);
        } else if let Some(parent_row) = self.row_mut(parent) {
            parent_row.children.push(node);
            parent_row.container.get_or_insert(false);
        }

        let index = node.index();
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, || None);
        }
        self.rows[index] = Some(Row {
            connector: row.connector.clone(),
            spec: row.clone(),
            children: Vec::new(),
            container: None,
            selected: false,
        });
    }

    fn set_connector(&mut self, node: NodeId, icon: &Icon) {
        if let Some(row) = self.row_mut(node) {
            row.connector = icon.clone();
        }
    }

    fn show_children(&mut self, node: NodeId, reveal: Reveal) {
        if reveal == Reveal::Animated {
            self.animations += 1;
        }
        if let Some(row) = self.row_mut(node) {
            row.container = Some(true);
        }
    }

    fn hide_children(&mut self, node: NodeId, reveal: Reveal) {
        if reveal == Reveal::Animated {
            self.animations += 1;
        }
        if let Some(row) = self.row_mut(node)
            && row.container.is_some()
        {
            row.container = Some(false);
        }
    }

    fn mark_selected(&mut self, node: NodeId, selected: bool) {
        if let Some(row) = self.row_mut(node) {
            row.selected = selected;
        }
    }

    fn row_top(&self, node: NodeId) -> Option<f64> {
        let position = self.visible().iter().position(|&id| id == node)?;
        #[allow(clippy::cast_precision_loss)]
        Some(position as f64 * self.row_height)
    }

    fn scroll_to(&mut self, scroll_top: f64) {
        self.scroll_top = Some(scroll_top);
    }
}

fn push_img(html: &mut String, icon: &Icon) {
    let _ = write!(
        html,
        "<img src=\"{}\" alt=\"\" border=\"0\">",
        escape(&icon.src)
    );
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str, action: LabelAction, toggles: bool) -> RowSpec {
        RowSpec {
            label: label.to_owned(),
            depth: 1,
            indent: Vec::new(),
            connector: Glyph::connector(false, toggles, false).icon(""),
            toggles,
            action,
        }
    }

    fn id(index: usize) -> NodeId {
        NodeId(index)
    }

    #[test]
    fn test_render_html_structure() {
        let mut surface = HtmlSurface::default();
        let (a, b) = (id(1), id(2));
        surface.create_row(
            a,
            NodeId::ROOT,
            &spec("Files", LabelAction::Toggle, true),
        );
        surface.create_row(
            b,
            a,
            &spec("a.h", LabelAction::Navigate("a_8h.html".to_owned()), false),
        );

        let html = surface.render_html();

        assert!(html.starts_with("<div id=\"nav-tree-contents\">"));
        assert!(html.contains("<li data-node=\"1\">"));
        assert!(html.contains("<a class=\"nolink\" href=\"javascript:void(0)\">Files</a>"));
        assert!(html.contains("<ul class=\"children_ul\" style=\"display:none\">"));
        assert!(html.contains("<a href=\"a_8h.html\">a.h</a>"));
        assert!(html.contains("<a class=\"toggle\" href=\"javascript:void(0)\"><img src=\"ftv2pnode.png\""));
    }

    #[test]
    fn test_show_children_removes_display_none() {
        let mut surface = HtmlSurface::default();
        let (a, b) = (id(1), id(2));
        surface.create_row(a, NodeId::ROOT, &spec("A", LabelAction::Toggle, true));
        surface.create_row(b, a, &spec("B", LabelAction::None, false));

        surface.show_children(a, Reveal::Immediate);

        assert!(surface.children_visible(a));
        assert!(surface.render_html().contains("<ul class=\"children_ul\">"));
    }

    #[test]
    fn test_selected_row_markup() {
        let mut surface = HtmlSurface::default();
        let a = id(1);
        surface.create_row(a, NodeId::ROOT, &spec("A", LabelAction::None, false));

        surface.mark_selected(a, true);

        assert!(
            surface
                .render_html()
                .contains("<div class=\"item selected\" id=\"selected\">")
        );
    }

    #[test]
    fn test_row_top_counts_visible_rows() {
        let mut surface = HtmlSurface::new("tree", 10.0);
        let (a, b, c) = (id(1), id(2), id(3));
        surface.create_row(a, NodeId::ROOT, &spec("A", LabelAction::Toggle, true));
        surface.create_row(b, a, &spec("B", LabelAction::None, false));
        surface.create_row(c, NodeId::ROOT, &spec("C", LabelAction::None, false));

        assert_eq!(surface.row_top(c), Some(10.0));
        assert_eq!(surface.row_top(b), None);

        surface.show_children(a, Reveal::Immediate);

        assert_eq!(surface.row_top(b), Some(10.0));
        assert_eq!(surface.row_top(c), Some(20.0));
    }

    #[test]
    fn test_scroll_offset_is_rendered() {
        let mut surface = HtmlSurface::new("tree", 10.0);

        surface.scroll_to(42.0);

        assert!(
            surface
                .render_html()
                .starts_with("<div id=\"tree\" data-scroll-top=\"42\">")
        );
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut surface = HtmlSurface::default();
        let a = id(1);
        surface.create_row(
            a,
            NodeId::ROOT,
            &spec("vector<T>", LabelAction::None, false),
        );

        assert!(surface.render_html().contains("<a>vector&lt;T&gt;</a>"));
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("\"hello\""), "&quot;hello&quot;");
    }
}
