//! Shared helpers.

/// Escape text for use in HTML content and double-quoted attributes.
///
/// # Examples
///
/// ```
/// use markdownizer_core::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Maps byte offsets to 1-based line numbers.
///
/// Offsets must be queried in non-decreasing order, which keeps a full scan of
/// the document linear.
#[derive(Debug)]
pub(crate) struct LineCounter {
    pos: usize,
    line: usize,
}

impl LineCounter {
    pub(crate) fn new() -> Self {
        Self { pos: 0, line: 1 }
    }

    /// Line number of byte offset `pos` in `text`.
    pub(crate) fn line_at(&mut self, text: &str, pos: usize) -> usize {
        if pos > self.pos {
            self.line += text.as_bytes()[self.pos..pos]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.pos = pos;
        }
        self.line
    }
}
