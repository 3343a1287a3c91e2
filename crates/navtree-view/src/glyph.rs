//! Connector and indentation glyphs.
//!
//! Each row starts with one indentation glyph per ancestor below the root,
//! followed by the node's own connector glyph. Icon filenames are fixed and
//! resolved against the relative path prefix of the hosting page.

/// One of the eight fixed tree glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Leaf with more siblings below.
    Node,
    /// Last leaf of its parent.
    LastNode,
    /// Collapsed branch with more siblings below.
    PlusNode,
    /// Collapsed branch, last of its parent.
    PlusLastNode,
    /// Expanded branch with more siblings below.
    MinusNode,
    /// Expanded branch, last of its parent.
    MinusLastNode,
    /// Indentation under an ancestor that has more siblings.
    VertLine,
    /// Indentation under an ancestor that is the last sibling.
    Blank,
}

impl Glyph {
    pub const ALL: [Self; 8] = [
        Self::Node,
        Self::LastNode,
        Self::PlusNode,
        Self::PlusLastNode,
        Self::MinusNode,
        Self::MinusLastNode,
        Self::VertLine,
        Self::Blank,
    ];

    /// Connector glyph for a row.
    ///
    /// `expanded` only matters when `has_children` is true.
    #[must_use]
    pub fn connector(is_last_sibling: bool, has_children: bool, expanded: bool) -> Self {
        match (has_children, expanded, is_last_sibling) {
            (false, _, false) => Self::Node,
            (false, _, true) => Self::LastNode,
            (true, false, false) => Self::PlusNode,
            (true, false, true) => Self::PlusLastNode,
            (true, true, false) => Self::MinusNode,
            (true, true, true) => Self::MinusLastNode,
        }
    }

    /// Indentation glyph drawn for an ancestor.
    #[must_use]
    pub fn indent(ancestor_is_last_sibling: bool) -> Self {
        if ancestor_is_last_sibling {
            Self::Blank
        } else {
            Self::VertLine
        }
    }

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Node => "ftv2node.png",
            Self::LastNode => "ftv2lastnode.png",
            Self::PlusNode => "ftv2pnode.png",
            Self::PlusLastNode => "ftv2plastnode.png",
            Self::MinusNode => "ftv2mnode.png",
            Self::MinusLastNode => "ftv2mlastnode.png",
            Self::VertLine => "ftv2vertline.png",
            Self::Blank => "ftv2blank.png",
        }
    }

    /// Icon for this glyph resolved against `relpath`.
    #[must_use]
    pub fn icon(self, relpath: &str) -> Icon {
        Icon {
            glyph: self,
            src: format!("{relpath}{}", self.file_name()),
        }
    }
}

/// A glyph with its resolved image source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    pub glyph: Glyph,
    pub src: String,
}
