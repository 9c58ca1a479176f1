//! Highlighter error types.

/// Error raised while highlighting or building a stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Requested theme is not bundled with syntect.
    #[error("unknown theme '{name}' (available: {available})")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
        /// Comma-separated list of bundled themes.
        available: String,
    },

    /// Grammar failed on a line of code.
    #[error("failed to parse code: {0}")]
    Parse(#[from] syntect::parsing::ParsingError),

    /// Scope stack or CSS generation failed.
    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}
