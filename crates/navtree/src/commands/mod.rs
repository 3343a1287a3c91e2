//! CLI command implementations.

pub(crate) mod locate;
pub(crate) mod render;
pub(crate) mod tree;

pub(crate) use locate::LocateArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tree::TreeArgs;

use std::path::PathBuf;

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_model::TreeModel;

use crate::error::CliError;

/// Options shared by every command for finding the config and model.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tree model file, `.js` script or JSON (overrides config).
    #[arg(short, long, env = "NAVTREE_MODEL")]
    model: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config with `settings` applied, then the model it names.
    fn load(&self, mut settings: CliSettings) -> Result<(Config, TreeModel), CliError> {
        settings.model.clone_from(&self.model);
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::info!(
            model = %config.tree_resolved.model_path.display(),
            "Loading tree model"
        );
        let model = TreeModel::load(&config.tree_resolved.model_path)?;
        Ok((config, model))
    }
}
