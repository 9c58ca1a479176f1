//! Highlight-line expressions.
//!
//! The argument of `{% highlight ... %}` is a small literal, never evaluated
//! code. Accepted forms:
//!
//! - `[1, 4, 7]`: explicit list of positive line numbers
//! - `(2..5)` or `2..5`: inclusive range
//! - `(2...5)` or `2...5`: range excluding the end

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Widest range accepted by the parser.
pub const MAX_RANGE_LINES: u32 = 10_000;

/// Error from parsing a highlight-line expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineSpecError {
    /// Neither a list nor a range.
    #[error("expected `[a, b, ...]` or `(a..b)`, found `{0}`")]
    Syntax(String),
    /// A list element or range bound that is not a positive integer.
    #[error("`{0}` is not a positive line number")]
    InvalidNumber(String),
    /// `[]`.
    #[error("line list is empty")]
    EmptyList,
    /// Range whose end comes before its start.
    #[error("range `{0}` selects no lines")]
    EmptyRange(String),
    /// Range wider than [`MAX_RANGE_LINES`].
    #[error("range `{0}` spans more than {MAX_RANGE_LINES} lines")]
    TooWide(String),
}

/// Ordered set of 1-based line numbers to emphasize.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightLines(BTreeSet<u32>);

impl HighlightLines {
    /// Parse a highlight-line expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdownizer_core::HighlightLines;
    ///
    /// let list = HighlightLines::parse("[1,2,3]").unwrap();
    /// let range = HighlightLines::parse("(1..3)").unwrap();
    /// assert_eq!(list, range);
    /// assert!(HighlightLines::parse("system('rm -rf /')").is_err());
    /// ```
    pub fn parse(expr: &str) -> Result<Self, LineSpecError> {
        let expr = expr.trim();

        if let Some(inner) = expr.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return parse_list(inner);
        }

        let inner = expr
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(expr);

        if let Some((start, end)) = inner.split_once("...") {
            let start = parse_line_number(start)?;
            let end = parse_line_number(end)?;
            return range(expr, start, end - 1);
        }
        if let Some((start, end)) = inner.split_once("..") {
            let start = parse_line_number(start)?;
            let end = parse_line_number(end)?;
            return range(expr, start, end);
        }

        Err(LineSpecError::Syntax(expr.to_owned()))
    }

    /// Check whether `line` is emphasized.
    #[must_use]
    pub fn contains(&self, line: u32) -> bool {
        self.0.contains(&line)
    }

    /// Iterate line numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Number of emphasized lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no line is emphasized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for HighlightLines {
    type Err = LineSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<u32> for HighlightLines {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|&line| line > 0).collect())
    }
}

impl fmt::Display for HighlightLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, line) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{line}")?;
        }
        f.write_str("]")
    }
}

fn parse_list(inner: &str) -> Result<HighlightLines, LineSpecError> {
    if inner.trim().is_empty() {
        return Err(LineSpecError::EmptyList);
    }
    inner
        .split(',')
        .map(parse_line_number)
        .collect::<Result<BTreeSet<_>, _>>()
        .map(HighlightLines)
}

fn range(expr: &str, start: u32, end: u32) -> Result<HighlightLines, LineSpecError> {
    if end < start {
        return Err(LineSpecError::EmptyRange(expr.to_owned()));
    }
    if end - start >= MAX_RANGE_LINES {
        return Err(LineSpecError::TooWide(expr.to_owned()));
    }
    Ok(HighlightLines((start..=end).collect()))
}

fn parse_line_number(s: &str) -> Result<u32, LineSpecError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LineSpecError::InvalidNumber(s.to_owned()));
    }
    match s.parse::<u32>() {
        Ok(line) if line > 0 => Ok(line),
        _ => Err(LineSpecError::InvalidNumber(s.to_owned())),
    }
}
