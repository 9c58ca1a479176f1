//! Code-block extraction: the first pipeline stage.
//!
//! Replaces every `{% code <lang> %}` ... `{% endcode %}` region with the
//! highlighted HTML fragment. After this stage:
//!
//! - no terminated fence remains in the document
//! - each fragment sits on a single line (newlines encoded as `&#10;`) and is
//!   followed by a blank line, so the Markdown adapter keeps it as one raw
//!   HTML block
//! - every `#` run inside a fragment is escaped with a backslash, so neither
//!   the heading rewriter nor the Markdown adapter reads it as a heading

use crate::adapter::HighlightAdapter;
use crate::code_block::CodeBlock;
use crate::directive::{self, DirectiveKind, FENCE_CLOSE};
use crate::options::RenderOptions;
use crate::util::LineCounter;

/// Extracts and renders code fences.
///
/// # Example
///
/// ```
/// use markdownizer_core::{CodeBlockExtractor, PlainHighlighter, RenderOptions};
///
/// let options = RenderOptions::default();
/// let mut extractor = CodeBlockExtractor::new(&PlainHighlighter, &options);
/// let output = extractor.process("{% code ruby %}\n# hi\n{% endcode %}");
///
/// assert!(output.starts_with(r#"<div class="markdownizer_code">"#));
/// assert!(output.contains(r"\# hi"));
/// assert!(extractor.warnings().is_empty());
/// ```
pub struct CodeBlockExtractor<'a, H: HighlightAdapter + ?Sized> {
    highlighter: &'a H,
    options: &'a RenderOptions,
    warnings: Vec<String>,
    blocks: usize,
}

impl<'a, H: HighlightAdapter + ?Sized> CodeBlockExtractor<'a, H> {
    /// Create an extractor rendering with `highlighter` and caller `options`.
    #[must_use]
    pub fn new(highlighter: &'a H, options: &'a RenderOptions) -> Self {
        Self {
            highlighter,
            options,
            warnings: Vec::new(),
            blocks: 0,
        }
    }

    /// Replace all code fences in `input`.
    ///
    /// An opening fence without a closing `{% endcode %}` is left as literal
    /// text and reported as a warning; scanning continues after it.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut lines = LineCounter::new();
        let mut cursor = 0;
        // Once a search for `{% endcode %}` fails, every later one fails too.
        let mut closers_exhausted = false;

        while let Some(open) = directive::find_fence_open(input, cursor) {
            let line = lines.line_at(input, open.start);
            let close = if closers_exhausted {
                None
            } else {
                directive::find_fence_close(input, open.end)
            };

            let Some(close) = close else {
                closers_exhausted = true;
                self.warn(
                    line,
                    &format!(
                        "unterminated {} (missing {FENCE_CLOSE})",
                        DirectiveKind::Code.tag(open.language)
                    ),
                );
                output.push_str(&input[cursor..open.end]);
                cursor = open.end;
                continue;
            };

            output.push_str(&input[cursor..open.start]);

            let block = CodeBlock::parse(
                open.language,
                &input[open.end..close],
                line,
                &mut self.warnings,
            );
            output.push_str(&self.render(&block));
            self.blocks += 1;

            cursor = close + FENCE_CLOSE.len();
            output.push_str(block_terminator(&input[cursor..]));
        }

        output.push_str(&input[cursor..]);
        output
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of code blocks rendered.
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Consume the extractor and return its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Highlight and wrap one block, protected for the later stages.
    fn render(&self, block: &CodeBlock) -> String {
        let options = block.options(self.options);
        let fragment = self
            .highlighter
            .scan(&block.code, &block.language)
            .to_html(&options);
        let wrapped = block.wrap(&fragment, self.options.css_class());
        directive::escape_markers(&flatten(&wrapped))
    }

    fn warn(&mut self, line: usize, message: &str) {
        tracing::warn!(line, "{message}");
        self.warnings.push(format!("line {line}: {message}"));
    }
}

/// Text that ends the raw HTML block of a fragment followed by `rest`.
///
/// A raw HTML block runs until the next blank line, so the fragment's line
/// must be followed by one. Nothing is added when `rest` is empty or already
/// starts with a blank line. Text on the same line as `{% endcode %}` moves
/// below the blank line.
fn block_terminator(rest: &str) -> &'static str {
    let (line, after) = match rest.find('\n') {
        Some(pos) => (&rest[..=pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    let crlf = line.ends_with("\r\n");

    if rest.is_empty() {
        ""
    } else if line.trim_end_matches(['\r', '\n']).is_empty() {
        // `{% endcode %}` ends its line.
        if after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n") {
            ""
        } else if crlf {
            "\r\n"
        } else {
            "\n"
        }
    } else if crlf {
        "\r\n\r\n"
    } else {
        "\n\n"
    }
}

/// Put an HTML fragment on a single line.
fn flatten(html: &str) -> String {
    html.replace("\r\n", "\n").replace('\n', "&#10;")
}
