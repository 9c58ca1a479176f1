//! Pipeline orchestration.
//!
//! Rendering runs three text stages before Markdown conversion, in this order:
//!
//! 1. [`CodeBlockExtractor`]: fences replaced by highlighted fragments, `#`
//!    runs inside fragments escaped
//! 2. [`shift_headings`]: heading markers deepened, escapes still in place
//! 3. [`unescape_markers`]: fragment markers restored, text ready for the
//!    Markdown adapter
//!
//! Running the rewriter before extraction would shift comment lines of code
//! that is still raw text; converting Markdown before the rewriter would leave
//! headings at their original depth.

use crate::adapter::{HighlightAdapter, MarkdownAdapter, PlainHighlighter};
use crate::directive::unescape_markers;
use crate::extract::CodeBlockExtractor;
use crate::headings::shift_headings;
use crate::markdown::CmarkAdapter;
use crate::options::RenderOptions;

/// Text after the preprocessing stages, before Markdown conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prepared {
    /// Markdown with code fences rendered and headings shifted.
    pub text: String,
    /// Number of code blocks rendered.
    pub blocks: usize,
    /// Warnings from directive parsing.
    pub warnings: Vec<String>,
}

/// Result of rendering a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Number of code blocks rendered.
    pub blocks: usize,
    /// Warnings from directive parsing (e.g. unterminated fences).
    pub warnings: Vec<String>,
}

/// Markdown renderer with highlighted code fences and heading offsets.
///
/// Holds only the two adapters; every call works on its own document and
/// options, so one instance can serve concurrent renders.
///
/// # Example
///
/// ```
/// use markdownizer_core::{Markdownizer, RenderOptions};
///
/// let markdownizer = Markdownizer::plain();
/// let result = markdownizer.render("# Intro\n\nHello", 1, &RenderOptions::default());
///
/// assert_eq!(result.html, "<h2>Intro</h2>\n<p>Hello</p>\n");
/// ```
#[derive(Clone, Debug)]
pub struct Markdownizer<H = PlainHighlighter, M = CmarkAdapter> {
    highlighter: H,
    markdown: M,
}

impl Markdownizer {
    /// Renderer with the plain highlighter and GFM Markdown.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(PlainHighlighter, CmarkAdapter::new())
    }
}

impl Default for Markdownizer {
    fn default() -> Self {
        Self::plain()
    }
}

impl<H: HighlightAdapter, M: MarkdownAdapter> Markdownizer<H, M> {
    /// Create a renderer from a highlighter and a Markdown adapter.
    #[must_use]
    pub fn new(highlighter: H, markdown: M) -> Self {
        Self {
            highlighter,
            markdown,
        }
    }

    /// The highlight adapter.
    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    /// The Markdown adapter.
    pub fn markdown(&self) -> &M {
        &self.markdown
    }

    /// Run the preprocessing stages without Markdown conversion.
    #[must_use]
    pub fn prepare(&self, text: &str, hierarchy: usize, options: &RenderOptions) -> Prepared {
        let mut extractor = CodeBlockExtractor::new(&self.highlighter, options);
        let extracted = extractor.process(text);
        let shifted = shift_headings(&extracted, hierarchy);

        Prepared {
            text: unescape_markers(&shifted),
            blocks: extractor.blocks(),
            warnings: extractor.into_warnings(),
        }
    }

    /// Render `text` to HTML.
    ///
    /// `hierarchy` is added to the depth of every heading. Malformed
    /// directives never abort rendering; they are reported in
    /// [`RenderResult::warnings`].
    #[must_use]
    pub fn render(&self, text: &str, hierarchy: usize, options: &RenderOptions) -> RenderResult {
        let prepared = self.prepare(text, hierarchy, options);
        tracing::debug!(
            blocks = prepared.blocks,
            warnings = prepared.warnings.len(),
            "Document prepared"
        );

        RenderResult {
            html: self.markdown.to_html(&prepared.text),
            blocks: prepared.blocks,
            warnings: prepared.warnings,
        }
    }
}
