//! Colored status messages on stderr.
//!
//! Rendered HTML and theme listings go to stdout; everything printed here
//! goes to stderr so it never mixes into a piped document.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Status reporter for CLI commands.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a reporter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Report the warnings of one render, followed by a count.
    pub(crate) fn render_warnings(&self, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }
        for warning in warnings {
            self.line(&self.yellow, &format!("Warning: {warning}"));
        }
        self.line(&self.dim, &warning_summary(warnings.len()));
    }

    /// Report a file written by a command (green).
    pub(crate) fn wrote(&self, what: &str, path: &Path) {
        self.line(&self.green, &format!("Wrote {what}: {}", path.display()));
    }

    /// Report the highlighting theme in use.
    pub(crate) fn theme(&self, name: &str) {
        self.line(&self.dim, &format!("Theme: {name}"));
    }

    /// Report a fatal error (red).
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&self.red, &format!("Error: {err}"));
    }

    fn line(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

/// Summary line printed after render warnings.
fn warning_summary(count: usize) -> String {
    match count {
        1 => "1 warning".to_owned(),
        n => format!("{n} warnings"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_warning_summary() {
        assert_eq!(warning_summary(1), "1 warning");
        assert_eq!(warning_summary(3), "3 warnings");
    }
}
