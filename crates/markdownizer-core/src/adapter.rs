//! Boundary interfaces to the external highlighter and Markdown renderer.
//!
//! The pipeline never highlights code or parses Markdown itself. It talks to
//! two adapters:
//!
//! - [`HighlightAdapter`]: turns code plus a language token into an HTML
//!   fragment, in two steps (`scan`, then [`HighlightResult::to_html`])
//! - [`MarkdownAdapter`]: plain Markdown-to-HTML conversion with no notion of
//!   heading depth
//!
//! [`PlainHighlighter`] is the built-in highlighter: escaped, unstyled
//! preformatted output. Real highlighters fall back to the same output for
//! languages they do not know; [`layout_lines`] is shared for that purpose.

use std::fmt::Write;

use crate::options::{HighlightOptions, LineNumbers};
use crate::util::escape_html;

/// External syntax highlighter.
pub trait HighlightAdapter {
    /// Tokenize `code` as `language`.
    ///
    /// Unknown languages must not fail: return an unstyled result instead.
    fn scan(&self, code: &str, language: &str) -> Box<dyn HighlightResult>;
}

/// Scanned code, ready to be laid out as HTML.
pub trait HighlightResult {
    /// Render the scanned code with the given per-block options.
    fn to_html(&self, options: &HighlightOptions) -> String;
}

/// External Markdown renderer.
pub trait MarkdownAdapter {
    /// Convert Markdown text to HTML.
    fn to_html(&self, text: &str) -> String;
}

impl<T: HighlightAdapter + ?Sized> HighlightAdapter for Box<T> {
    fn scan(&self, code: &str, language: &str) -> Box<dyn HighlightResult> {
        (**self).scan(code, language)
    }
}

impl<T: MarkdownAdapter + ?Sized> MarkdownAdapter for Box<T> {
    fn to_html(&self, text: &str) -> String {
        (**self).to_html(text)
    }
}

/// Highlighter producing escaped, unstyled preformatted code.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl HighlightAdapter for PlainHighlighter {
    fn scan(&self, code: &str, language: &str) -> Box<dyn HighlightResult> {
        Box::new(PlainResult::new(code, language))
    }
}

/// Result of [`PlainHighlighter::scan`]: one escaped string per code line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlainResult {
    language: String,
    lines: Vec<String>,
}

impl PlainResult {
    /// Escape `code` line by line.
    #[must_use]
    pub fn new(code: &str, language: &str) -> Self {
        Self {
            language: language.to_owned(),
            lines: code.lines().map(escape_html).collect(),
        }
    }
}

impl HighlightResult for PlainResult {
    fn to_html(&self, options: &HighlightOptions) -> String {
        layout_lines(&self.lines, &self.language, options)
    }
}

/// Lay out rendered code lines according to the block options.
///
/// Each entry of `lines` must be a self-contained HTML fragment for one code
/// line (no newline, balanced tags). Line numbers and emphasized lines are
/// applied here so every highlighter renders them the same way:
///
/// - no line numbers: `<div class="highlight"><pre><code>`
/// - [`LineNumbers::Inline`]: a `<span class="line-number">` before each line
/// - [`LineNumbers::Table`]: numbers and code in two table cells
///
/// Emphasized lines are wrapped in `<span class="line highlighted">`; in table
/// mode their numbers are also wrapped in `<strong class="highlighted">`.
#[must_use]
pub fn layout_lines(lines: &[String], language: &str, options: &HighlightOptions) -> String {
    let start = options.line_number_start();
    let mut code = String::new();
    let mut numbers = String::new();

    for (idx, line) in (1u32..).zip(lines) {
        let number = start.saturating_add(idx - 1);
        let highlighted = options.is_highlighted(idx);
        if idx > 1 {
            code.push('\n');
            numbers.push('\n');
        }

        if options.line_numbers == Some(LineNumbers::Inline) {
            write!(code, r#"<span class="line-number">{number}</span>"#).unwrap();
        }
        if highlighted {
            write!(code, r#"<span class="line highlighted">{line}</span>"#).unwrap();
            write!(numbers, r#"<strong class="highlighted">{number}</strong>"#).unwrap();
        } else {
            code.push_str(line);
            write!(numbers, "{number}").unwrap();
        }
    }

    let pre = format!(
        r#"<pre><code class="language-{}">{code}</code></pre>"#,
        escape_html(language)
    );
    match options.line_numbers {
        Some(LineNumbers::Table) => format!(
            r#"<div class="highlight"><table class="code-table"><tr><td class="line-numbers"><pre>{numbers}</pre></td><td class="code">{pre}</td></tr></table></div>"#
        ),
        Some(LineNumbers::Inline) | None => format!(r#"<div class="highlight">{pre}</div>"#),
    }
}
