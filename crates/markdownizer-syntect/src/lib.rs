//! Syntect-backed highlighting for markdownizer.
//!
//! [`SyntectHighlighter`] implements [`markdownizer_core::HighlightAdapter`]
//! with syntect's bundled grammars. Output uses CSS classes rather than inline
//! styles, so a page needs the matching [`stylesheet`] once.
//!
//! # Example
//!
//! ```
//! use markdownizer_core::{CmarkAdapter, Markdownizer, RenderOptions};
//! use markdownizer_syntect::SyntectHighlighter;
//!
//! let markdownizer = Markdownizer::new(SyntectHighlighter::new(), CmarkAdapter::new());
//! let result = markdownizer.render(
//!     "{% code ruby %}\nputs 'hi'\n{% endcode %}",
//!     0,
//!     &RenderOptions::default(),
//! );
//!
//! assert!(result.html.contains(r#"<span class="source ruby">"#));
//! ```

mod error;
mod highlighter;
mod stylesheet;

pub use error::HighlightError;
pub use highlighter::SyntectHighlighter;
pub use stylesheet::{DEFAULT_THEME, stylesheet, theme_names};
