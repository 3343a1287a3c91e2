//! Tree model entries.
//!
//! The model is an immutable tagged tree loaded once. Child lists are shared
//! slices so that live view nodes can hold on to their not-yet-materialized
//! children without copying them.

use std::sync::Arc;

/// One entry of the navigation tree description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEntry {
    /// Entry without expandable content.
    Leaf {
        /// Display text.
        label: String,
        /// Navigation target, relative to the documentation root.
        link: Option<String>,
    },
    /// Entry with a non-empty list of children.
    Branch {
        /// Display text.
        label: String,
        /// Navigation target. `None` makes this a pure grouping entry.
        link: Option<String>,
        /// Child entries in display order.
        children: Arc<[TreeEntry]>,
    },
}

impl TreeEntry {
    /// Create a leaf entry.
    pub fn leaf(label: impl Into<String>, link: Option<&str>) -> Self {
        Self::Leaf {
            label: label.into(),
            link: link.map(str::to_owned),
        }
    }

    /// Create a branch entry.
    ///
    /// An empty child list has nothing to expand, so it yields a leaf.
    pub fn branch(label: impl Into<String>, link: Option<&str>, children: Vec<TreeEntry>) -> Self {
        if children.is_empty() {
            return Self::leaf(label, link);
        }
        Self::Branch {
            label: label.into(),
            link: link.map(str::to_owned),
            children: children.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf { label, .. } | Self::Branch { label, .. } => label,
        }
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Leaf { link, .. } | Self::Branch { link, .. } => link.as_deref(),
        }
    }

    /// Child entries, `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&Arc<[TreeEntry]>> {
        match self {
            Self::Leaf { .. } => None,
            Self::Branch { children, .. } => Some(children),
        }
    }

    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }
}

/// Immutable navigation tree description.
///
/// Holds the ordered top-level entries. Use [`TreeModel::from_json`],
/// [`TreeModel::from_script`] or [`TreeModel::load`] to build one from a
/// generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeModel {
    entries: Arc<[TreeEntry]>,
}

impl TreeModel {
    /// Create a model from top-level entries.
    #[must_use]
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &Arc<[TreeEntry]> {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries at every depth.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        fn count(entries: &[TreeEntry]) -> usize {
            entries
                .iter()
                .map(|entry| 1 + entry.children().map_or(0, |children| count(children)))
                .sum()
        }
        count(&self.entries)
    }

    /// Resolve an index path (as returned by [`TreeModel::locate`]) to an entry.
    ///
    /// Returns `None` for an empty path or when any index is out of range.
    #[must_use]
    pub fn entry_at(&self, path: &[usize]) -> Option<&TreeEntry> {
        let (&first, rest) = path.split_first()?;
        let mut entry = self.entries.get(first)?;
        for &index in rest {
            entry = entry.children()?.get(index)?;
        }
        Some(entry)
    }
}
