//! Stylesheets for highlighted output.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::css_for_theme_with_class_style;

use crate::error::HighlightError;
use crate::highlighter::CLASS_STYLE;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Layout rules; `$class` is replaced with the wrapper class.
const LAYOUT_CSS: &str = "
/* markdownizer layout */
.$class {
  margin: 1em 0;
}
.$class > h5 {
  margin: 0 0 0.5em;
  font-size: 0.9em;
}
.$class .highlight pre {
  overflow-x: auto;
  padding: 0.5em;
}
.$class .code-table {
  border-collapse: collapse;
  border-spacing: 0;
}
.$class .code-table td {
  padding: 0;
  vertical-align: top;
}
.$class .line-numbers pre,
.$class .line-number {
  color: #999;
  text-align: right;
  user-select: none;
}
.$class .line-number {
  display: inline-block;
  min-width: 2em;
  padding-right: 0.75em;
}
.$class .line.highlighted {
  display: inline-block;
  width: 100%;
  background-color: rgba(255, 255, 140, 0.5);
}
.$class strong.highlighted {
  font-weight: bold;
}
";

static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Names of the bundled themes, sorted.
#[must_use]
pub fn theme_names() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

/// Build the stylesheet for `theme`, with layout rules scoped to `css_class`.
///
/// # Errors
///
/// Returns [`HighlightError::UnknownTheme`] if the theme is not bundled, or
/// [`HighlightError::Syntect`] if CSS generation fails.
pub fn stylesheet(theme: &str, css_class: &str) -> Result<String, HighlightError> {
    let Some(found) = THEMES.themes.get(theme) else {
        return Err(HighlightError::UnknownTheme {
            name: theme.to_owned(),
            available: theme_names().join(", "),
        });
    };

    let mut css = css_for_theme_with_class_style(found, CLASS_STYLE)?;
    css.push_str(&LAYOUT_CSS.replace("$class", css_class));
    Ok(css)
}

#[cfg(test)]
mod tests {
    use markdownizer_core::DEFAULT_CSS_CLASS;

    use super::*;

    #[test]
    fn test_theme_names() {
        let names = theme_names();
        assert!(names.contains(&DEFAULT_THEME));
        assert!(names.contains(&"base16-ocean.dark"));
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_stylesheet_default_theme() {
        let css = stylesheet(DEFAULT_THEME, DEFAULT_CSS_CLASS).unwrap();
        assert!(css.contains(".markdownizer_code .line-number"));
        assert!(css.contains(".markdownizer_code .line.highlighted"));
        assert!(css.contains(".comment"));
        assert!(!css.contains("$class"));
    }

    #[test]
    fn test_stylesheet_custom_class() {
        let css = stylesheet(DEFAULT_THEME, "code-box").unwrap();
        assert!(css.contains(".code-box > h5"));
        assert!(!css.contains(".markdownizer_code"));
    }

    #[test]
    fn test_unknown_theme() {
        let err = stylesheet("no-such-theme", DEFAULT_CSS_CLASS).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("unknown theme 'no-such-theme'"));
        assert!(message.contains(DEFAULT_THEME));
    }
}
