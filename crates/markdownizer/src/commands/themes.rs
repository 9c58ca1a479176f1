//! `markdownizer themes` command implementation.

use std::io::Write;

use markdownizer_syntect::{DEFAULT_THEME, theme_names};

use crate::error::CliError;

/// Print the bundled theme names, one per line.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub(crate) fn execute() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    for name in theme_names() {
        if name == DEFAULT_THEME {
            writeln!(stdout, "{name} (default)")?;
        } else {
            writeln!(stdout, "{name}")?;
        }
    }
    Ok(())
}
