//! Markdown rendering with highlighted code fences and heading offsets.
//!
//! Documents are Markdown with two additions:
//!
//! - code regions delimited by `{% code <lang> %}` and `{% endcode %}`, which
//!   may carry a `{% caption '...' %}` and a `{% highlight [1,2] %}` directive
//! - a caller-supplied hierarchy offset added to every heading's depth
//!
//! # Architecture
//!
//! [`Markdownizer::render`] runs a fixed sequence of stages:
//!
//! 1. [`CodeBlockExtractor`] renders each code region through a
//!    [`HighlightAdapter`] and escapes heading markers inside the result
//! 2. [`shift_headings`] deepens heading markers outside code
//! 3. [`directive::unescape_markers`] restores the escaped markers
//! 4. a [`MarkdownAdapter`] converts the text to HTML
//!
//! Highlighting and Markdown parsing are delegated. [`PlainHighlighter`] and
//! [`CmarkAdapter`] are the built-in adapters; `markdownizer-syntect` provides
//! a real highlighter.
//!
//! # Example
//!
//! ```
//! use markdownizer_core::{Markdownizer, RenderOptions};
//!
//! let text = "# Usage\n\n{% code ruby %}\n{% caption 'Hello' %}\nputs 'hi'\n{% endcode %}\n";
//! let result = Markdownizer::plain().render(text, 1, &RenderOptions::default());
//!
//! assert!(result.html.starts_with("<h2>Usage</h2>"));
//! assert!(result.html.contains("<h5>Hello</h5>"));
//! ```

mod adapter;
mod code_block;
pub mod directive;
mod extract;
mod fence;
mod headings;
mod lines;
mod markdown;
mod options;
mod pipeline;
mod util;

pub use adapter::{
    HighlightAdapter, HighlightResult, MarkdownAdapter, PlainHighlighter, PlainResult,
    layout_lines,
};
pub use code_block::CodeBlock;
pub use extract::CodeBlockExtractor;
pub use headings::shift_headings;
pub use lines::{HighlightLines, LineSpecError, MAX_RANGE_LINES};
pub use markdown::CmarkAdapter;
pub use options::{CssMode, DEFAULT_CSS_CLASS, HighlightOptions, LineNumbers, RenderOptions};
pub use pipeline::{Markdownizer, Prepared, RenderResult};
pub use util::escape_html;
