//! `markdownizer install` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use markdownizer_config::{CliSettings, Config};
use markdownizer_syntect::stylesheet;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the install command.
#[derive(Args)]
pub(crate) struct InstallArgs {
    /// Highlighting theme (overrides config).
    #[arg(long, env = "MARKDOWNIZER_THEME")]
    theme: Option<String>,

    /// Stylesheet output path (default: public/stylesheets/markdownizer.css).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Class of the element wrapping each code block (overrides config).
    #[arg(long)]
    css_class: Option<String>,

    /// Overwrite an existing stylesheet.
    #[arg(long)]
    force: bool,

    /// Path to configuration file (default: auto-discover markdownizer.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InstallArgs {
    /// Execute the install command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the theme is unknown, or the
    /// stylesheet exists and `--force` is not set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme: self.theme,
            stylesheet: self.output,
            css_class: self.css_class,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let path = &config.assets_resolved.stylesheet;
        install_stylesheet(&config, path, self.force)?;

        output.theme(&config.highlight.theme);
        output.wrote("stylesheet", path);
        Ok(())
    }
}

/// Write the stylesheet for the configured theme and class to `path`.
fn install_stylesheet(config: &Config, path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let css = stylesheet(&config.highlight.theme, &config.render.css_class)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, css).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), theme = %config.highlight.theme, "Stylesheet written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path, toml: &str) -> Config {
        let path = dir.join("markdownizer.toml");
        std::fs::write(&path, toml).unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_install_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "");
        let path = &config.assets_resolved.stylesheet;

        install_stylesheet(&config, path, false).unwrap();

        let css = std::fs::read_to_string(dir.path().join("public/stylesheets/markdownizer.css"))
            .unwrap();
        assert!(css.contains(".markdownizer_code .line-number"));
    }

    #[test]
    fn test_install_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "[assets]\nstylesheet = \"code.css\"\n");
        let path = &config.assets_resolved.stylesheet;
        std::fs::write(path, "/* mine */").unwrap();

        let err = install_stylesheet(&config, path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "/* mine */");

        install_stylesheet(&config, path, true).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains(".markdownizer_code"));
    }

    #[test]
    fn test_install_unknown_theme() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "[highlight]\ntheme = \"nope\"\n");
        let path = &config.assets_resolved.stylesheet;

        let err = install_stylesheet(&config, path, false).unwrap_err();
        assert!(err.to_string().starts_with("unknown theme 'nope'"));
        assert!(!path.exists());
    }
}
