//! `navtree render` command implementation.

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_model::TreeModel;
use navtree_view::{HtmlSurface, TreeController, TreeEvent, TreeOptions, Viewport};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Page the tree is opened at, as it appears in the model links.
    #[arg(short, long)]
    page: String,

    /// Prefix for links and icons (overrides config).
    #[arg(short, long)]
    relpath: Option<String>,

    /// Page selected when --page is not in the tree (overrides config).
    #[arg(long)]
    fallback_page: Option<String>,

    /// Window height used to center the selected row (overrides config).
    #[arg(long)]
    viewport_height: Option<f64>,

    /// Animate expand and collapse (default: enabled).
    #[arg(long)]
    animate: Option<bool>,

    /// Disable animation.
    #[arg(long, conflicts_with = "animate")]
    no_animate: bool,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// HTML of an initialized tree.
#[derive(Debug)]
pub(crate) struct Rendered {
    pub(crate) html: String,
    /// Label of the selected row, if any.
    pub(crate) selected: Option<String>,
    pub(crate) scroll_top: Option<f64>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or model loading fails, or the
    /// output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let animate = self.resolve_animate();
        let settings = CliSettings {
            relpath: self.relpath,
            fallback_page: self.fallback_page,
            animate,
            viewport_height: self.viewport_height,
            ..Default::default()
        };
        let (config, model) = self.source.load(settings)?;

        let rendered = render_page(&config, model, &self.page);
        match &rendered.selected {
            Some(label) => output.detail(&format!("Selected: {label}")),
            None => output.warning(&format!(
                "{} is not in the tree, nothing selected",
                self.page
            )),
        }
        if let Some(scroll_top) = rendered.scroll_top {
            output.detail(&format!("Scroll offset: {scroll_top}px"));
        }

        if let Some(path) = &self.output {
            std::fs::write(path, &rendered.html)?;
            output.success(&format!("Wrote {}", path.display()));
        } else {
            output.emit(&rendered.html)?;
        }

        Ok(())
    }

    /// Resolve animation from --animate/--no-animate flags.
    fn resolve_animate(&self) -> Option<bool> {
        self.no_animate.then_some(false).or(self.animate)
    }
}

/// Open the tree at `page` and deliver the page-load reveal.
pub(crate) fn render_page(config: &Config, model: TreeModel, page: &str) -> Rendered {
    let viewport = Viewport {
        height: config.layout.viewport_height,
        header_height: config.layout.header_height,
        footer_height: config.layout.footer_height,
    };
    let options = TreeOptions {
        fallback_page: config.tree_resolved.fallback_page.clone(),
        animate: config.render.animate,
        viewport,
    };
    let surface = HtmlSurface::new(config.render.mount_id.clone(), config.layout.row_height);

    let mut controller =
        TreeController::init(model, surface, page, &config.assets.relpath, options);
    controller.handle(TreeEvent::PageLoaded(viewport));

    let selected = controller
        .selected()
        .map(|id| controller.tree()[id].label().to_owned());
    let surface = controller.into_surface();
    Rendered {
        html: surface.render_html(),
        selected,
        scroll_top: surface.scroll_top(),
    }
}
