//! `pulldown-cmark` backed [`MarkdownAdapter`].

use pulldown_cmark::{Options, Parser, html};

use crate::adapter::MarkdownAdapter;

/// Standard Markdown-to-HTML conversion via `pulldown-cmark`.
///
/// GFM extensions (tables, strikethrough, task lists) are enabled by default.
#[derive(Clone, Copy, Debug)]
pub struct CmarkAdapter {
    gfm: bool,
}

impl CmarkAdapter {
    /// Create an adapter with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GFM extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl Default for CmarkAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownAdapter for CmarkAdapter {
    fn to_html(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.parser_options());
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let html = CmarkAdapter::new().to_html("## Title\n\nSome *text*.");
        assert_eq!(html, "<h2>Title</h2>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_escaped_marker_is_literal() {
        let html = CmarkAdapter::new().to_html("\\# not a heading");
        assert_eq!(html, "<p># not a heading</p>\n");
    }

    #[test]
    fn test_raw_html_block_passes_through() {
        let html = CmarkAdapter::new().to_html("<div class=\"x\"><pre>a&#10;b</pre></div>\n\n# H");
        assert!(html.starts_with("<div class=\"x\"><pre>a&#10;b</pre></div>"));
        assert!(html.contains("<h1>H</h1>"));
    }

    #[test]
    fn test_gfm_toggle() {
        let table = "| a |\n|---|\n| b |";
        assert!(CmarkAdapter::new().to_html(table).contains("<table>"));
        assert!(
            !CmarkAdapter::new()
                .with_gfm(false)
                .to_html(table)
                .contains("<table>")
        );
    }
}
