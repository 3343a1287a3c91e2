//! Lazily materialized navigation tree view for navtree.
//!
//! This crate provides:
//! - [`TreeController`]: startup and event dispatch for the tree
//! - [`ExpansionController`]: the expand/collapse state machine
//! - [`NodeFactory`]: construction of live nodes and their rows
//! - [`RenderSurface`]: the presentation seam, with [`HtmlSurface`] as the bundled backend
//!
//! Nodes are only built when their parent is first expanded, and are never
//! destroyed. Collapsing hides them.
//!
//! # Quick Start
//!
//! ```
//! use navtree_model::TreeModel;
//! use navtree_view::{HtmlSurface, TreeController, TreeEvent, TreeOptions, Viewport};
//!
//! let model = TreeModel::from_json(
//!     r#"[["A", "a.html", null], ["B", null, [["C", "c.html", null]]]]"#,
//! )?;
//! let mut controller = TreeController::init(
//!     model,
//!     HtmlSurface::default(),
//!     "c.html",
//!     "../",
//!     TreeOptions::default(),
//! );
//! controller.handle(TreeEvent::PageLoaded(Viewport::default()));
//!
//! let html = controller.surface().render_html();
//! assert!(html.contains("id=\"selected\""));
//! # Ok::<(), navtree_model::ModelError>(())
//! ```

mod controller;
mod expansion;
mod factory;
mod glyph;
mod html;
mod node;
mod surface;

pub use controller::{TreeAction, TreeController, TreeEvent, TreeOptions, Viewport};
pub use expansion::{ExpansionController, Outcome, Transition, TransitionKind};
pub use factory::NodeFactory;
pub use glyph::{Glyph, Icon};
pub use html::{DEFAULT_MOUNT_ID, DEFAULT_ROW_HEIGHT, HtmlSurface};
pub use node::{ExpansionState, NavTree, NodeId, TreeNode};
pub use surface::{LabelAction, RenderSurface, Reveal, RowSpec};
