//! Configuration management for markdownizer.
//!
//! Parses `markdownizer.toml` configuration files with serde and provides
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
//! - `render.css_class`
//! - `highlight.theme`
//! - `assets.stylesheet`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use markdownizer_core::{DEFAULT_CSS_CLASS, LineNumbers, RenderOptions};
pub use markdownizer_syntect::DEFAULT_THEME;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override heading hierarchy offset.
    pub hierarchy: Option<usize>,
    /// Override line-number mode.
    pub line_numbers: Option<LineNumbers>,
    /// Override wrapper CSS class.
    pub css_class: Option<String>,
    /// Override highlight theme.
    pub theme: Option<String>,
    /// Override stylesheet output path.
    pub stylesheet: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "markdownizer.toml";

/// Stylesheet path, relative to the config directory, unless configured.
pub const DEFAULT_STYLESHEET: &str = "public/stylesheets/markdownizer.css";

/// Largest accepted hierarchy offset; `# A` shifted by 5 is already `<h6>`.
const MAX_HIERARCHY: usize = 5;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Highlighting configuration.
    pub highlight: HighlightConfig,
    /// Asset configuration (paths are relative strings from TOML).
    assets: AssetsConfigRaw,

    /// Resolved asset configuration (set after loading).
    #[serde(skip)]
    pub assets_resolved: AssetsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Heading hierarchy offset.
    pub hierarchy: usize,
    /// Line-number mode for code blocks (none when absent).
    pub line_numbers: Option<LineNumbers>,
    /// Class of the element wrapping each code block.
    pub css_class: String,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Highlighter pass-through options.
    pub extra: BTreeMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hierarchy: 0,
            line_numbers: None,
            css_class: DEFAULT_CSS_CLASS.to_owned(),
            gfm: true,
            extra: BTreeMap::new(),
        }
    }
}

/// Highlighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Theme for generated stylesheets.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
        }
    }
}

/// Raw asset configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    stylesheet: Option<String>,
}

/// Resolved asset configuration with absolute paths.
#[derive(Debug, Default)]
pub struct AssetsConfig {
    /// Output path of the installed stylesheet.
    pub stylesheet: PathBuf,
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
        /// Config field path (e.g., "`highlight.theme`").
        field: String,
        /// Error message (e.g., "${`CODE_THEME`} not set").
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

/// Require a string field to be a single CSS class name.
fn require_class_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let valid_start = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-');
    let valid_rest = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_start || !valid_rest {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single CSS class name, got '{value}'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `markdownizer.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
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

    /// Render options for the pipeline.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_numbers: self.render.line_numbers,
            css_class: Some(self.render.css_class.clone()),
            extra: self.render.extra.clone(),
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(hierarchy) = settings.hierarchy {
            self.render.hierarchy = hierarchy;
        }
        if let Some(line_numbers) = settings.line_numbers {
            self.render.line_numbers = Some(line_numbers);
        }
        if let Some(css_class) = &settings.css_class {
            self.render.css_class.clone_from(css_class);
        }
        if let Some(theme) = &settings.theme {
            self.highlight.theme.clone_from(theme);
        }
        if let Some(stylesheet) = &settings.stylesheet {
            self.assets_resolved.stylesheet.clone_from(stylesheet);
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
            render: RenderConfig::default(),
            highlight: HighlightConfig::default(),
            assets: AssetsConfigRaw::default(),
            assets_resolved: AssetsConfig {
                stylesheet: base.join(DEFAULT_STYLESHEET),
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
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        require_non_empty(&self.highlight.theme, "highlight.theme")?;
        Ok(())
    }

    /// Validate render configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        require_class_name(&self.render.css_class, "render.css_class")?;

        if self.render.hierarchy > MAX_HIERARCHY {
            return Err(ConfigError::Validation(format!(
                "render.hierarchy cannot exceed {MAX_HIERARCHY}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.css_class = expand::expand_env(&self.render.css_class, "render.css_class")?;
        self.highlight.theme = expand::expand_env(&self.highlight.theme, "highlight.theme")?;

        if let Some(ref stylesheet) = self.assets.stylesheet {
            self.assets.stylesheet = Some(expand::expand_env(stylesheet, "assets.stylesheet")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let stylesheet = self
            .assets
            .stylesheet
            .as_deref()
            .unwrap_or(DEFAULT_STYLESHEET);

        self.assets_resolved = AssetsConfig {
            stylesheet: config_dir.join(stylesheet),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.render.hierarchy, 0);
        assert_eq!(config.render.line_numbers, None);
        assert_eq!(config.render.css_class, "markdownizer_code");
        assert!(config.render.gfm);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert_eq!(
            config.assets_resolved.stylesheet,
            PathBuf::from("/test/public/stylesheets/markdownizer.css")
        );
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_default_theme_is_bundled() {
        let config: Config = toml::from_str("").unwrap();
        assert!(markdownizer_syntect::theme_names().contains(&config.highlight.theme.as_str()));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.css_class, "markdownizer_code");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
hierarchy = 2
line_numbers = "table"
css_class = "code-box"
gfm = false

[render.extra]
line_number_start = "10"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.hierarchy, 2);
        assert_eq!(config.render.line_numbers, Some(LineNumbers::Table));
        assert_eq!(config.render.css_class, "code-box");
        assert!(!config.render.gfm);
        assert_eq!(
            config.render.extra.get("line_number_start").map(String::as_str),
            Some("10")
        );
    }

    #[test]
    fn test_parse_invalid_line_numbers() {
        let toml = r#"
[render]
line_numbers = "sideways"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_render_options() {
        let toml = r#"
[render]
line_numbers = "inline"

[render.extra]
line_number_start = "5"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let options = config.render_options();

        assert_eq!(options.line_numbers, Some(LineNumbers::Inline));
        assert_eq!(options.css_class(), "markdownizer_code");
        assert_eq!(options.extra.get("line_number_start").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[assets]
stylesheet = "static/code.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.assets_resolved.stylesheet,
            PathBuf::from("/project/static/code.css")
        );
    }

    #[test]
    fn test_resolve_absolute_stylesheet() {
        let toml = r#"
[assets]
stylesheet = "/srv/www/code.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.assets_resolved.stylesheet,
            PathBuf::from("/srv/www/code.css")
        );
    }

    #[test]
    fn test_validate_css_class() {
        for class in ["", "two words", "1code", "a.b"] {
            let mut config = Config::default_with_base(Path::new("/test"));
            config.render.css_class = class.to_owned();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::Validation(_)),
                "Expected ConfigError::Validation for {class:?}, got {err:?}"
            );
            assert!(err.to_string().contains("render.css_class"));
        }
    }

    #[test]
    fn test_validate_hierarchy() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.render.hierarchy = 5;
        config.validate().unwrap();

        config.render.hierarchy = 6;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.hierarchy cannot exceed 5"));
    }

    #[test]
    fn test_validate_theme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.highlight.theme = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: highlight.theme cannot be empty"
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            hierarchy: Some(3),
            line_numbers: Some(LineNumbers::Table),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.hierarchy, 3);
        assert_eq!(config.render.line_numbers, Some(LineNumbers::Table));
        assert_eq!(config.render.css_class, "markdownizer_code"); // Unchanged
        assert_eq!(config.highlight.theme, "InspiredGitHub"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_assets() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            css_class: Some("code".to_owned()),
            theme: Some("base16-ocean.dark".to_owned()),
            stylesheet: Some(PathBuf::from("/out/code.css")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.css_class, "code");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(
            config.assets_resolved.stylesheet,
            PathBuf::from("/out/code.css")
        );
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MARKDOWNIZER_CONFIG_TEST_THEME", "Solarized (dark)");
            std::env::remove_var("MARKDOWNIZER_CONFIG_TEST_DIR");
        }

        let toml = r#"
[highlight]
theme = "${MARKDOWNIZER_CONFIG_TEST_THEME}"

[assets]
stylesheet = "${MARKDOWNIZER_CONFIG_TEST_DIR:-public}/code.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.highlight.theme, "Solarized (dark)");
        assert_eq!(config.assets.stylesheet.as_deref(), Some("public/code.css"));

        unsafe {
            std::env::remove_var("MARKDOWNIZER_CONFIG_TEST_THEME");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[render]
hierarchy = 1

[highlight]
theme = "base16-ocean.dark"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.render.hierarchy, 1);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.assets_resolved.stylesheet,
            dir.path().join(DEFAULT_STYLESHEET)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render]\nhierarchy = 9\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            css_class: Some("not valid".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(err.to_string().contains("render.css_class"));
    }
}
