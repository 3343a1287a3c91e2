//! Static navigation tree model for navtree.
//!
//! This crate provides:
//! - [`TreeModel`]: the immutable nested description of navigable pages
//! - Loaders for JSON documents and Doxygen-style `navtree.js` scripts
//! - [`find_path`]: the breadcrumb locator used to open the tree at the current page
//!
//! # Quick Start
//!
//! ```
//! use navtree_model::TreeModel;
//!
//! let model = TreeModel::from_json(
//!     r#"[["A", "a.html", null], ["B", null, [["C", "c.html", null]]]]"#,
//! )?;
//!
//! assert_eq!(model.locate("c.html"), Some(vec![1, 0]));
//! # Ok::<(), navtree_model::ModelError>(())
//! ```

mod entry;
mod loader;
mod locator;

pub use entry::{TreeEntry, TreeModel};
pub use loader::ModelError;
pub use locator::{BreadcrumbItem, DEFAULT_FALLBACK_PAGE, Location, find_path};
