//! `navtree locate` command implementation.

use clap::Args;
use navtree_config::CliSettings;
use navtree_model::{BreadcrumbItem, Location, TreeModel};
use serde::Serialize;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the locate command.
#[derive(Args)]
pub(crate) struct LocateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Page to look up, as it appears in the model links.
    page: String,

    /// Page tried when PAGE is not in the tree (overrides config).
    #[arg(long)]
    fallback_page: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

/// Where a page sits in the tree.
#[derive(Debug, Serialize)]
pub(crate) struct LocateReport {
    pub(crate) page: String,
    pub(crate) location: Option<Location>,
    pub(crate) breadcrumbs: Vec<BreadcrumbItem>,
}

impl LocateReport {
    /// Locate `page` in `model`, retrying with `fallback` on a miss.
    pub(crate) fn new(model: &TreeModel, page: &str, fallback: &str) -> Self {
        let location = model.locate_or_fallback(page, fallback);
        let breadcrumbs = location
            .as_ref()
            .map(|location| model.breadcrumbs(&location.path))
            .unwrap_or_default();
        Self {
            page: page.to_owned(),
            location,
            breadcrumbs,
        }
    }

    /// Index path joined with `/`, e.g. `1/0`.
    pub(crate) fn path_string(&self) -> Option<String> {
        let location = self.location.as_ref()?;
        Some(
            location
                .path
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    /// Breadcrumb labels joined with ` > `.
    pub(crate) fn trail(&self) -> String {
        self.breadcrumbs
            .iter()
            .map(|item| item.label.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl LocateArgs {
    /// Execute the locate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or model loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            fallback_page: self.fallback_page,
            ..Default::default()
        };
        let (config, model) = self.source.load(settings)?;
        let report = LocateReport::new(&model, &self.page, &config.tree_resolved.fallback_page);

        if self.json {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            output.emit(&json)?;
            return Ok(());
        }

        let Some(path) = report.path_string() else {
            output.warning(&format!(
                "{} is not in the tree and neither is {}",
                self.page, config.tree_resolved.fallback_page
            ));
            return Ok(());
        };
        if report.location.as_ref().is_some_and(|location| location.fallback) {
            output.warning(&format!(
                "{} is not in the tree, using {}",
                self.page, config.tree_resolved.fallback_page
            ));
        }
        output.info(&format!("Path: {path}"));
        output.info(&format!("Breadcrumbs: {}", report.trail()));
        for item in &report.breadcrumbs {
            if let Some(link) = &item.link {
                output.detail(&format!("  {} -> {link}", item.label));
            } else {
                output.detail(&format!("  {}", item.label));
            }
        }

        Ok(())
    }
}
