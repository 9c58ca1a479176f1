//! Directive grammar shared by the pipeline stages.
//!
//! Three directive shapes are recognized, all delimited by `{%` and `%}`:
//!
//! - `{% code <lang> %}` ... `{% endcode %}`: a fenced code region
//! - `{% caption '<text>' %}`: caption for the enclosing code region
//! - `{% highlight <expr> %}`: lines to emphasize in the enclosing code region
//!
//! Fences do not nest: the first `{% endcode %}` after an opening fence
//! terminates it. Caption and highlight directives only mean something inside
//! a fence.
//!
//! # Caption boundaries
//!
//! A caption runs from the first `'` after the keyword to the last `'` that is
//! followed by ` %}` on the same line. Single quotes in between are literal
//! text; there is no escape syntax and captions cannot span lines.
//!
//! # Marker escaping
//!
//! `#` runs inside rendered code must not be read as headings by the hierarchy
//! rewriter or the Markdown adapter. [`escape_markers`] prefixes every run with
//! a backslash and [`unescape_markers`] removes exactly that backslash again.

use std::sync::LazyLock;

use regex::Regex;

/// Closing fence delimiter.
pub const FENCE_CLOSE: &str = "{% endcode %}";

static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% code (\w+) %\}").unwrap());

static CAPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% caption '(.*)' %\}").unwrap());

static HIGHLIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% highlight (.*?) ?%\}").unwrap());

/// The recognized directive shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `{% code <lang> %}`, closed by `{% endcode %}`.
    Code,
    /// `{% caption '<text>' %}`.
    Caption,
    /// `{% highlight <expr> %}`.
    Highlight,
}

impl DirectiveKind {
    /// Keyword following the opening `{%`.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Caption => "caption",
            Self::Highlight => "highlight",
        }
    }

    /// Directive as written in a document, for messages.
    ///
    /// ```
    /// use markdownizer_core::directive::DirectiveKind;
    ///
    /// assert_eq!(DirectiveKind::Code.tag("ruby"), "{% code ruby %}");
    /// assert_eq!(DirectiveKind::Caption.tag(""), "{% caption %}");
    /// ```
    #[must_use]
    pub fn tag(self, argument: &str) -> String {
        if argument.is_empty() {
            format!("{{% {} %}}", self.keyword())
        } else {
            format!("{{% {} {argument} %}}", self.keyword())
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Code => &FENCE_OPEN_RE,
            Self::Caption => &CAPTION_RE,
            Self::Highlight => &HIGHLIGHT_RE,
        }
    }
}

/// Opening fence located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FenceOpen<'a> {
    /// Byte offset of `{%`.
    pub(crate) start: usize,
    /// Byte offset just past `%}`.
    pub(crate) end: usize,
    /// Language token.
    pub(crate) language: &'a str,
}

/// Find the next opening fence at or after `from`.
pub(crate) fn find_fence_open(text: &str, from: usize) -> Option<FenceOpen<'_>> {
    let caps = FENCE_OPEN_RE.captures_at(text, from)?;
    let whole = caps.get(0)?;
    Some(FenceOpen {
        start: whole.start(),
        end: whole.end(),
        language: caps.get(1)?.as_str(),
    })
}

/// Find the next closing fence at or after `from`, returning its start offset.
pub(crate) fn find_fence_close(text: &str, from: usize) -> Option<usize> {
    text[from..].find(FENCE_CLOSE).map(|pos| from + pos)
}

/// Remove every directive of `kind` from `body`.
///
/// Returns the body without the directives and the captured values, in
/// document order.
pub(crate) fn take(kind: DirectiveKind, body: &str) -> (String, Vec<String>) {
    let pattern = kind.pattern();
    let mut values = Vec::new();
    let stripped = pattern.replace_all(body, |caps: &regex::Captures<'_>| {
        values.push(caps.get(1).map_or("", |m| m.as_str()).to_owned());
        ""
    });
    (stripped.into_owned(), values)
}

/// Prefix every run of `#` with a backslash.
///
/// # Examples
///
/// ```
/// use markdownizer_core::directive::escape_markers;
///
/// assert_eq!(escape_markers("## a # b"), r"\## a \# b");
/// ```
#[must_use]
pub fn escape_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut in_run = false;
    for c in text.chars() {
        if c == '#' && !in_run {
            out.push('\\');
        }
        in_run = c == '#';
        out.push(c);
    }
    out
}

/// Remove one escaping backslash in front of each `#` run.
///
/// Runs in heading position keep their backslash: CommonMark already reads
/// `\#` there as a literal `#`, and dropping it would turn the line into a
/// heading. Heading position is the start of a line after optional spaces or
/// tabs and any blockquote (`>`) or list item (`-`, `*`, `+`, `1.`, `1)`)
/// markers.
///
/// # Examples
///
/// ```
/// use markdownizer_core::directive::{escape_markers, unescape_markers};
///
/// assert_eq!(unescape_markers(r"<b>\# x</b>"), "<b># x</b>");
/// assert_eq!(unescape_markers(r"\# not a heading"), r"\# not a heading");
/// assert_eq!(unescape_markers(r"> - \# quoted item"), r"> - \# quoted item");
/// assert_eq!(unescape_markers(&escape_markers("a \\# b")), "a \\# b");
/// ```
#[must_use]
pub fn unescape_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let heading = heading_position(line);
        let mut chars = line.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            if c == '\\' && pos != heading && matches!(chars.peek(), Some((_, '#'))) {
                continue;
            }
            out.push(c);
        }
    }
    out
}

/// Byte offset where a heading marker would start on `line`.
fn heading_position(line: &str) -> usize {
    let bytes = line.as_bytes();
    let is_blank = |pos: usize| matches!(bytes.get(pos), Some(b' ' | b'\t'));
    let mut pos = 0;
    loop {
        while is_blank(pos) {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(b'>') => pos += 1,
            Some(b'-' | b'*' | b'+') if is_blank(pos + 1) => pos += 1,
            Some(b'0'..=b'9') => {
                let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
                let delimiter = matches!(bytes.get(pos + digits), Some(b'.' | b')'));
                if digits <= 9 && delimiter && is_blank(pos + digits + 1) {
                    pos += digits + 1;
                } else {
                    return pos;
                }
            }
            _ => return pos,
        }
    }
}
