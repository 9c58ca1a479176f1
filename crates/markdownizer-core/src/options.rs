//! Caller render options and the per-block options handed to highlighters.

use std::collections::BTreeMap;

use crate::lines::HighlightLines;

/// Default class of the element enclosing each highlighted code block.
pub const DEFAULT_CSS_CLASS: &str = "markdownizer_code";

/// Extra keys owned by block directives. Caller values for them are dropped.
const RESERVED_KEYS: [&str; 2] = ["caption", "highlight_lines"];

/// Line-number display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum LineNumbers {
    /// Numbers in a separate table column.
    Table,
    /// Numbers prefixed to each code line.
    Inline,
}

/// Styling mode requested from the highlighter.
///
/// Wrapping elements and highlighter output are styled through CSS classes so
/// a separately shipped stylesheet can target them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum CssMode {
    /// Class attributes only, no inline styles.
    #[default]
    Class,
}

/// Options supplied by the caller for one render.
///
/// Shared by every code block in the document and never modified by the
/// pipeline; each block derives its own [`HighlightOptions`] from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct RenderOptions {
    /// Line-number display mode (none when absent).
    pub line_numbers: Option<LineNumbers>,
    /// Class of the enclosing element (defaults to [`DEFAULT_CSS_CLASS`]).
    pub css_class: Option<String>,
    /// Highlighter-specific pass-through keys.
    pub extra: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-number display mode.
    #[must_use]
    pub fn with_line_numbers(mut self, mode: LineNumbers) -> Self {
        self.line_numbers = Some(mode);
        self
    }

    /// Set the class of the enclosing element.
    #[must_use]
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Add a pass-through option.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Class of the enclosing element.
    #[must_use]
    pub fn css_class(&self) -> &str {
        self.css_class.as_deref().unwrap_or(DEFAULT_CSS_CLASS)
    }

    /// Merge these options with the directives of one code block.
    ///
    /// The result is an independent value: blocks never observe each other's
    /// captions or highlighted lines.
    #[must_use]
    pub fn for_block(
        &self,
        caption: Option<&str>,
        highlight_lines: Option<&HighlightLines>,
    ) -> HighlightOptions {
        let mut extra = self.extra.clone();
        for key in RESERVED_KEYS {
            if extra.remove(key).is_some() {
                tracing::debug!(key, "Dropping caller option owned by block directives");
            }
        }
        HighlightOptions {
            css: CssMode::Class,
            line_numbers: self.line_numbers,
            caption: caption.map(str::to_owned),
            highlight_lines: highlight_lines.cloned(),
            extra,
        }
    }
}

/// Options for highlighting a single code block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Styling mode.
    pub css: CssMode,
    /// Line-number display mode.
    pub line_numbers: Option<LineNumbers>,
    /// Caption from `{% caption %}`.
    pub caption: Option<String>,
    /// Lines from `{% highlight %}`.
    pub highlight_lines: Option<HighlightLines>,
    /// Caller pass-through keys.
    pub extra: BTreeMap<String, String>,
}

impl HighlightOptions {
    /// Look up a pass-through option.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Check whether the 1-based code line is emphasized.
    #[must_use]
    pub fn is_highlighted(&self, line: u32) -> bool {
        self.highlight_lines
            .as_ref()
            .is_some_and(|lines| lines.contains(line))
    }

    /// First displayed line number (`line_number_start`, default 1).
    #[must_use]
    pub fn line_number_start(&self) -> u32 {
        match self.extra("line_number_start").map(str::parse::<u32>) {
            Some(Ok(start)) if start > 0 => start,
            Some(_) => {
                tracing::debug!("Ignoring invalid line_number_start");
                1
            }
            None => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_css_class() {
        assert_eq!(RenderOptions::new().css_class(), "markdownizer_code");
        assert_eq!(
            RenderOptions::new().with_css_class("code").css_class(),
            "code"
        );
    }

    #[test]
    fn test_for_block_copies_caller_options() {
        let options = RenderOptions::new()
            .with_line_numbers(LineNumbers::Table)
            .with_extra("tab_width", "4");
        let lines = HighlightLines::parse("[2]").unwrap();

        let block = options.for_block(Some("Caption"), Some(&lines));

        assert_eq!(block.css, CssMode::Class);
        assert_eq!(block.line_numbers, Some(LineNumbers::Table));
        assert_eq!(block.caption.as_deref(), Some("Caption"));
        assert!(block.is_highlighted(2));
        assert_eq!(block.extra("tab_width"), Some("4"));
    }

    #[test]
    fn test_for_block_drops_reserved_keys() {
        let options = RenderOptions::new()
            .with_extra("caption", "from caller")
            .with_extra("highlight_lines", "[1]")
            .with_extra("kept", "yes");

        let block = options.for_block(None, None);

        assert_eq!(block.caption, None);
        assert_eq!(block.highlight_lines, None);
        assert_eq!(block.extra("caption"), None);
        assert_eq!(block.extra("highlight_lines"), None);
        assert_eq!(block.extra("kept"), Some("yes"));
        // Caller options untouched
        assert_eq!(options.extra.len(), 3);
    }

    #[test]
    fn test_blocks_are_independent() {
        let options = RenderOptions::new();
        let lines = HighlightLines::parse("[1]").unwrap();

        let first = options.for_block(Some("First"), Some(&lines));
        let second = options.for_block(None, None);

        assert_eq!(first.caption.as_deref(), Some("First"));
        assert_eq!(second.caption, None);
        assert!(!second.is_highlighted(1));
    }

    #[test]
    fn test_line_number_start() {
        let options = RenderOptions::new();
        assert_eq!(options.for_block(None, None).line_number_start(), 1);

        let options = RenderOptions::new().with_extra("line_number_start", "10");
        assert_eq!(options.for_block(None, None).line_number_start(), 10);

        let options = RenderOptions::new().with_extra("line_number_start", "zero");
        assert_eq!(options.for_block(None, None).line_number_start(), 1);
    }
}
