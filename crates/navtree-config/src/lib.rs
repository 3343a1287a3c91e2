//! Configuration management for navtree.
//!
//! Parses `navtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `tree.model`
//! - `tree.fallback_page`
//! - `assets.relpath`
//! - `render.mount_id`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override tree model file.
    pub model: Option<PathBuf>,
    /// Override relative path prefix.
    pub relpath: Option<String>,
    /// Override fallback page.
    pub fallback_page: Option<String>,
    /// Override animation flag.
    pub animate: Option<bool>,
    /// Override viewport height.
    pub viewport_height: Option<f64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Default model path relative to the config directory.
const DEFAULT_MODEL_PATH: &str = "html/navtree.js";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tree source configuration (model path is a relative string from TOML).
    tree: TreeConfigRaw,
    /// Asset path configuration.
    pub assets: AssetsConfig,
    /// Page geometry used to center the selected row.
    pub layout: LayoutConfig,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved tree configuration (set after loading).
    #[serde(skip)]
    pub tree_resolved: TreeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw tree configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TreeConfigRaw {
    model: Option<String>,
    fallback_page: Option<String>,
}

/// Resolved tree configuration with absolute paths.
#[derive(Debug, Default)]
pub struct TreeConfig {
    /// Tree model file (`.js` script or JSON).
    pub model_path: PathBuf,
    /// Page selected when the current page is not in the tree.
    pub fallback_page: String,
}

/// Asset path configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Prefix applied to links and icon paths.
    pub relpath: String,
}

/// Page geometry in pixels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Total window height.
    pub viewport_height: f64,
    /// Header chrome above the tree.
    pub header_height: f64,
    /// Footer chrome below the tree.
    pub footer_height: f64,
    /// Height of one tree row.
    pub row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            header_height: 0.0,
            footer_height: 0.0,
            row_height: 22.0,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Id of the container element the tree is mounted into.
    pub mount_id: String,
    /// Animate user-driven expand and collapse.
    pub animate: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mount_id: "nav-tree-contents".to_owned(),
            animate: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.relpath`").
        field: String,
        /// Error message (e.g., "${`DOCS_RELPATH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a length to be finite and not negative.
fn require_non_negative(value: f64, field: &str) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(model) = &settings.model {
            self.tree_resolved.model_path.clone_from(model);
        }
        if let Some(relpath) = &settings.relpath {
            self.assets.relpath.clone_from(relpath);
        }
        if let Some(fallback_page) = &settings.fallback_page {
            self.tree_resolved.fallback_page.clone_from(fallback_page);
        }
        if let Some(animate) = settings.animate {
            self.render.animate = animate;
        }
        if let Some(viewport_height) = settings.viewport_height {
            self.layout.viewport_height = viewport_height;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            tree: TreeConfigRaw::default(),
            assets: AssetsConfig::default(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
            tree_resolved: TreeConfig {
                model_path: base.join(DEFAULT_MODEL_PATH),
                fallback_page: "index.html".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.tree_resolved.fallback_page, "tree.fallback_page")?;
        require_non_empty(&self.render.mount_id, "render.mount_id")?;
        self.validate_layout()
    }

    /// Validate layout geometry.
    fn validate_layout(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        require_non_negative(layout.viewport_height, "layout.viewport_height")?;
        require_non_negative(layout.header_height, "layout.header_height")?;
        require_non_negative(layout.footer_height, "layout.footer_height")?;
        require_non_negative(layout.row_height, "layout.row_height")?;

        if layout.row_height <= 0.0 {
            return Err(ConfigError::Validation(
                "layout.row_height must be greater than 0".to_owned(),
            ));
        }

        // No room left for the tree is almost certainly a typo
        if layout.header_height + layout.footer_height >= layout.viewport_height {
            return Err(ConfigError::Validation(
                "layout.viewport_height must exceed header_height + footer_height".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref model) = self.tree.model {
            self.tree.model = Some(expand::expand_env(model, "tree.model")?);
        }
        if let Some(ref fallback_page) = self.tree.fallback_page {
            self.tree.fallback_page =
                Some(expand::expand_env(fallback_page, "tree.fallback_page")?);
        }
        self.assets.relpath = expand::expand_env(&self.assets.relpath, "assets.relpath")?;
        self.render.mount_id = expand::expand_env(&self.render.mount_id, "render.mount_id")?;

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.tree_resolved = TreeConfig {
            model_path: config_dir.join(self.tree.model.as_deref().unwrap_or(DEFAULT_MODEL_PATH)),
            fallback_page: self
                .tree
                .fallback_page
                .clone()
                .unwrap_or_else(|| "index.html".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.tree_resolved.model_path,
            PathBuf::from("/test/html/navtree.js")
        );
        assert_eq!(config.tree_resolved.fallback_page, "index.html");
        assert_eq!(config.assets.relpath, "");
        assert_eq!(config.render.mount_id, "nav-tree-contents");
        assert!(config.render.animate);
        assert!((config.layout.row_height - 22.0).abs() < f64::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.mount_id, "nav-tree-contents");
        assert!((config.layout.viewport_height - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[tree]
model = "docs/html/navtreedata.js"
fallback_page = "main.html"

[assets]
relpath = "../"

[layout]
viewport_height = 900
header_height = 120
footer_height = 30
row_height = 20

[render]
mount_id = "side-nav"
animate = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.tree_resolved.model_path,
            PathBuf::from("/project/docs/html/navtreedata.js")
        );
        assert_eq!(config.tree_resolved.fallback_page, "main.html");
        assert_eq!(config.assets.relpath, "../");
        assert!((config.layout.header_height - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.render.mount_id, "side-nav");
        assert!(!config.render.animate);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_row_height() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.layout.row_height = 0.0;

        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("row_height"));
    }

    #[test]
    fn test_validate_rejects_chrome_taller_than_viewport() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.layout.header_height = 500.0;
        config.layout.footer_height = 300.0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("viewport_height"));
    }

    #[test]
    fn test_validate_rejects_negative_lengths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.layout.footer_height = -1.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_mount_id() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.render.mount_id = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.mount_id"));
    }

    #[test]
    fn test_apply_cli_settings_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            model: Some(PathBuf::from("/custom/navtree.json")),
            relpath: Some("../../".to_owned()),
            animate: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.tree_resolved.model_path,
            PathBuf::from("/custom/navtree.json")
        );
        assert_eq!(config.assets.relpath, "../../");
        assert!(!config.render.animate);
        assert_eq!(config.tree_resolved.fallback_page, "index.html"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty_keeps_values() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.tree_resolved.model_path,
            PathBuf::from("/test/html/navtree.js")
        );
        assert!(config.render.animate);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/navtree.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[tree]\nmodel = \"out/navtree.json\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.tree_resolved.model_path,
            dir.path().join("out/navtree.json")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_reports_invalid_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "[layout]\nrow_height = 0\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_applies_and_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtree.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            viewport_height: Some(10.0),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!((config.layout.viewport_height - 10.0).abs() < f64::EPSILON);

        let settings = CliSettings {
            fallback_page: Some(String::new()),
            ..Default::default()
        };
        assert!(Config::load(Some(&path), Some(&settings)).is_err());
    }
}
