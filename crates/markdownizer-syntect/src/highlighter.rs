//! Highlight adapter backed by syntect grammars.
//!
//! syntect emits HTML for a whole document, with spans that stay open across
//! line breaks when a scope (block comment, heredoc) covers several lines.
//! Line numbers and emphasized lines need each line to stand alone, so open
//! spans are closed at the end of every line and reopened on the next.

use std::fmt;
use std::fmt::Write;
use std::sync::{Arc, LazyLock};

use markdownizer_core::{
    HighlightAdapter, HighlightOptions, HighlightResult, PlainResult, layout_lines,
};
use syntect::html::{ClassStyle, line_tokens_to_classed_spans};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;

/// Class naming shared by highlighted output and generated stylesheets.
pub(crate) const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

const SPAN_OPEN: &str = r#"<span class=""#;
const SPAN_CLOSE: &str = "</span>";

static DEFAULT_SYNTAXES: LazyLock<Arc<SyntaxSet>> =
    LazyLock::new(|| Arc::new(SyntaxSet::load_defaults_newlines()));

/// Highlighter using syntect's grammars in CSS class mode.
///
/// Languages are looked up by file extension first, then by case-insensitive
/// grammar name, so `rb`, `ruby` and `Ruby` all select the Ruby grammar.
/// Unknown languages render as plain escaped code.
#[derive(Clone)]
pub struct SyntectHighlighter {
    syntaxes: Arc<SyntaxSet>,
}

impl SyntectHighlighter {
    /// Highlighter with syntect's bundled grammars.
    ///
    /// The grammars are loaded on first use and shared by all instances.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: Arc::clone(&DEFAULT_SYNTAXES),
        }
    }

    /// Highlighter with a custom set of grammars.
    #[must_use]
    pub fn with_syntax_set(syntaxes: SyntaxSet) -> Self {
        Self {
            syntaxes: Arc::new(syntaxes),
        }
    }

    /// Grammar selected for a language token.
    #[must_use]
    pub fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_token(language)
    }

    /// Check whether a language token selects a grammar.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    /// Highlight `code` into one self-contained HTML string per line.
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<Vec<String>, HighlightError> {
        let mut state = ParseState::new(syntax);
        let mut scopes = ScopeStack::new();
        let mut open = Vec::new();
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state.parse_line(line, &self.syntaxes)?;
            let (html, _) = line_tokens_to_classed_spans(line, &ops, CLASS_STYLE, &mut scopes)?;
            lines.push(balance_line(&html, &mut open));
        }

        Ok(lines)
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}

impl HighlightAdapter for SyntectHighlighter {
    fn scan(&self, code: &str, language: &str) -> Box<dyn HighlightResult> {
        let Some(syntax) = self.find_syntax(language) else {
            tracing::debug!(language, "No grammar for language, rendering plain code");
            return Box::new(PlainResult::new(code, language));
        };

        match self.highlight_lines(code, syntax) {
            Ok(lines) => Box::new(SyntectResult {
                language: language.to_owned(),
                lines,
            }),
            Err(e) => {
                tracing::warn!(language, error = %e, "Highlighting failed, rendering plain code");
                Box::new(PlainResult::new(code, language))
            }
        }
    }
}

/// Highlighted lines awaiting layout.
struct SyntectResult {
    language: String,
    lines: Vec<String>,
}

impl HighlightResult for SyntectResult {
    fn to_html(&self, options: &HighlightOptions) -> String {
        layout_lines(&self.lines, &self.language, options)
    }
}

/// Make one line of classed HTML self-contained.
///
/// `open` holds the classes of spans left open by previous lines; it is
/// reopened in front of the line and updated with the spans this line opens
/// and closes. Line terminators are dropped.
fn balance_line(html: &str, open: &mut Vec<String>) -> String {
    let mut line = String::with_capacity(html.len() + open.len() * 32);
    for class in open.iter() {
        write!(line, r#"{SPAN_OPEN}{class}">"#).unwrap();
    }
    line.push_str(&html.replace(['\r', '\n'], ""));

    let mut rest = html;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos..];
        if let Some(tail) = rest.strip_prefix(SPAN_OPEN) {
            let end = tail.find('"').unwrap_or(tail.len());
            open.push(tail[..end].to_owned());
            rest = &tail[end..];
        } else if let Some(tail) = rest.strip_prefix(SPAN_CLOSE) {
            open.pop();
            rest = tail;
        } else {
            rest = &rest[1..];
        }
    }

    for _ in open.iter() {
        line.push_str(SPAN_CLOSE);
    }
    line
}
