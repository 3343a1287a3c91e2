//! `navtree tree` command implementation.

use std::fmt::Write as _;

use clap::Args;
use navtree_config::CliSettings;
use navtree_model::TreeEntry;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Maximum depth to print, 1 for the first level only.
    #[arg(short, long)]
    depth: Option<usize>,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or model loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (_, model) = self.source.load(CliSettings::default())?;
        if model.is_empty() {
            output.warning("Tree model has no entries");
            return Ok(());
        }

        output.emit(&format_outline(model.entries(), self.depth))?;
        output.detail(&format!("{} entries", model.entry_count()));

        Ok(())
    }
}

/// Render entries as an outline, two spaces of indent per level.
///
/// Grouping entries are suffixed with `/`, linked entries show their target.
pub(crate) fn format_outline(entries: &[TreeEntry], max_depth: Option<usize>) -> String {
    fn walk(out: &mut String, entries: &[TreeEntry], level: usize, max_depth: Option<usize>) {
        if max_depth.is_some_and(|max| level > max) {
            return;
        }
        for entry in entries {
            let indent = "  ".repeat(level - 1);
            match (entry.link(), entry.is_branch()) {
                (Some(link), _) => {
                    let _ = writeln!(out, "{indent}{} ({link})", entry.label());
                }
                (None, true) => {
                    let _ = writeln!(out, "{indent}{}/", entry.label());
                }
                (None, false) => {
                    let _ = writeln!(out, "{indent}{}", entry.label());
                }
            }
            if let Some(children) = entry.children() {
                walk(out, children, level + 1, max_depth);
            }
        }
    }

    let mut out = String::new();
    walk(&mut out, entries, 1, max_depth);
    out
}
