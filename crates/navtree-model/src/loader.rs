//! Tree model loading.
//!
//! Two input formats are supported:
//!
//! - A JSON array of entries, each `[label, link|null, children|null]`.
//! - A generated script assigning that array to `NAVTREE`, e.g.
//!   `var NAVTREE = [ ... ];` followed by arbitrary code.
//!
//! Individual malformed entries never fail the load. They degrade to leaves
//! or are dropped with a warning. Only document-level problems are errors.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::entry::{TreeEntry, TreeModel};

/// Name of the script variable holding the tree description.
const MODEL_VARIABLE: &str = "NAVTREE";

/// Model loading error.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// I/O error reading the model file.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON syntax error.
    #[error("Invalid tree data: {0}")]
    Json(#[from] serde_json::Error),
    /// Script does not assign an array to `NAVTREE`.
    #[error("No NAVTREE array found in script")]
    MissingArray,
    /// Top-level value is not an array.
    #[error("Tree data must be an array of entries")]
    NotAnArray,
}

impl TreeModel {
    /// Parse a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(items) = value else {
            return Err(ModelError::NotAnArray);
        };
        let model = Self::new(parse_entries(&items));
        tracing::debug!(entries = model.entry_count(), "Loaded tree model");
        Ok(model)
    }

    /// Parse a script that assigns the entry array to `NAVTREE`.
    pub fn from_script(script: &str) -> Result<Self, ModelError> {
        let literal = extract_array_literal(script).ok_or(ModelError::MissingArray)?;
        Self::from_json(literal)
    }

    /// Load a model file, choosing the parser by extension.
    ///
    /// `.js` files are parsed as scripts, everything else as JSON.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_script = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("js"));
        if is_script {
            Self::from_script(&content)
        } else {
            Self::from_json(&content)
        }
    }
}

fn parse_entries(items: &[Value]) -> Vec<TreeEntry> {
    items.iter().filter_map(parse_entry).collect()
}

fn parse_entry(value: &Value) -> Option<TreeEntry> {
    let Value::Array(fields) = value else {
        tracing::warn!(entry = %value, "Skipping tree entry that is not an array");
        return None;
    };
    let Some(label) = fields.first().and_then(Value::as_str) else {
        tracing::warn!(entry = %value, "Skipping tree entry without a string label");
        return None;
    };
    let link = fields.get(1).and_then(Value::as_str);

    match fields.get(2) {
        Some(Value::Array(children)) => Some(TreeEntry::branch(
            label,
            link,
            parse_entries(children),
        )),
        None | Some(Value::Null) => Some(TreeEntry::leaf(label, link)),
        Some(other) => {
            tracing::warn!(label, children = %other, "Children are not a list, treating as leaf");
            Some(TreeEntry::leaf(label, link))
        }
    }
}

/// Find the array literal assigned to `NAVTREE`.
///
/// Brackets inside string literals are ignored.
fn extract_array_literal(script: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(found) = script[offset..].find(MODEL_VARIABLE) {
        let after_name = offset + found + MODEL_VARIABLE.len();
        let rest = script[after_name..].trim_start();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim_start();
            if value.starts_with('[') {
                let start = script.len() - value.len();
                let end = matching_bracket(&script[start..])?;
                return Some(&script[start..=start + end]);
            }
        }
        offset = after_name;
    }
    None
}

/// Byte index of the bracket closing the one at index 0.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
