//! Breadcrumb locator.
//!
//! Finds the entry whose link matches the current page and returns the
//! index path from the top level down to it.

use serde::Serialize;

use crate::entry::{TreeEntry, TreeModel};

/// Page tried when the current page is not part of the tree.
pub const DEFAULT_FALLBACK_PAGE: &str = "index.html";

/// Result of locating a page with fallback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Child indices from the top level to the matching entry.
    pub path: Vec<usize>,
    /// True if the path points at the fallback page rather than the target.
    pub fallback: bool,
}

/// One step of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display text.
    pub label: String,
    /// Link target, if the entry has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Search `entries` depth-first for an entry linking to `target`.
///
/// Entries are scanned in order. A direct match at a level is returned
/// before descending into that entry's children, and the first match in
/// pre-order wins.
///
/// # Examples
///
/// ```
/// use navtree_model::{TreeEntry, find_path};
///
/// let entries = vec![
///     TreeEntry::leaf("A", Some("a.html")),
///     TreeEntry::branch("B", None, vec![TreeEntry::leaf("C", Some("c.html"))]),
/// ];
///
/// assert_eq!(find_path("c.html", &entries), Some(vec![1, 0]));
/// assert_eq!(find_path("missing.html", &entries), None);
/// ```
pub fn find_path(target: &str, entries: &[TreeEntry]) -> Option<Vec<usize>> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.link() == Some(target) {
            return Some(vec![index]);
        }
        if let Some(children) = entry.children()
            && let Some(sub_path) = find_path(target, children)
        {
            let mut path = Vec::with_capacity(sub_path.len() + 1);
            path.push(index);
            path.extend(sub_path);
            return Some(path);
        }
    }
    None
}

impl TreeModel {
    /// Index path to the first entry linking to `target`.
    #[must_use]
    pub fn locate(&self, target: &str) -> Option<Vec<usize>> {
        find_path(target, self.entries())
    }

    /// Locate `target`, retrying with `fallback` on a miss.
    ///
    /// Returns `None` when neither page is in the tree, including for an
    /// empty model.
    #[must_use]
    pub fn locate_or_fallback(&self, target: &str, fallback: &str) -> Option<Location> {
        if let Some(path) = self.locate(target) {
            return Some(Location {
                path,
                fallback: false,
            });
        }

        tracing::debug!(page = target, fallback, "Page not in tree, trying fallback");
        let located = self.locate(fallback).map(|path| Location {
            path,
            fallback: true,
        });
        if located.is_none() {
            tracing::warn!(page = target, fallback, "Neither page nor fallback found in tree");
        }
        located
    }

    /// Labels and links from the top level down to the entry at `path`.
    ///
    /// Stops at the first index that does not resolve, so an invalid path
    /// yields the valid prefix of the trail.
    #[must_use]
    pub fn breadcrumbs(&self, path: &[usize]) -> Vec<BreadcrumbItem> {
        let mut trail = Vec::with_capacity(path.len());
        let mut level: &[TreeEntry] = self.entries();

        for &index in path {
            let Some(entry) = level.get(index) else {
                break;
            };
            trail.push(BreadcrumbItem {
                label: entry.label().to_owned(),
                link: entry.link().map(str::to_owned),
            });
            level = entry.children().map_or(&[][..], |children| &children[..]);
        }

        trail
    }
}
