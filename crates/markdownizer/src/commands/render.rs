//! `markdownizer render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use markdownizer_config::{CliSettings, Config};
use markdownizer_core::{
    CmarkAdapter, HighlightAdapter, LineNumbers, Markdownizer, PlainHighlighter, RenderResult,
};
use markdownizer_syntect::SyntectHighlighter;
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Line-number display mode.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LineNumbersArg {
    /// Numbers in a separate table column.
    Table,
    /// Numbers prefixed to each code line.
    Inline,
}

impl From<LineNumbersArg> for LineNumbers {
    fn from(arg: LineNumbersArg) -> Self {
        match arg {
            LineNumbersArg::Table => Self::Table,
            LineNumbersArg::Inline => Self::Inline,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin).
    input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Heading hierarchy offset (overrides config).
    #[arg(long)]
    hierarchy: Option<usize>,

    /// Line-number mode for code blocks (overrides config).
    #[arg(long, value_enum)]
    line_numbers: Option<LineNumbersArg>,

    /// Class of the element wrapping each code block (overrides config).
    #[arg(long)]
    css_class: Option<String>,

    /// Skip syntax highlighting and render code as plain text.
    #[arg(long)]
    plain: bool,

    /// Print a JSON object with `html` and `warnings` instead of HTML.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover markdownizer.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// JSON document printed with `--json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    html: &'a str,
    warnings: &'a [String],
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input or output file
    /// cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            hierarchy: self.hierarchy,
            line_numbers: self.line_numbers.map(Into::into),
            css_class: self.css_class.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = read_input(self.input.as_deref())?;
        let result = if self.plain {
            render_document(PlainHighlighter, &config, &text)
        } else {
            render_document(SyntectHighlighter::new(), &config, &text)
        };

        output.render_warnings(&result.warnings);

        let rendered = if self.json {
            let json = JsonOutput {
                html: &result.html,
                warnings: &result.warnings,
            };
            format!("{}\n", serde_json::to_string_pretty(&json)?)
        } else {
            result.html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
                output.wrote("HTML", path);
            }
            None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
        }

        Ok(())
    }
}

/// Render `text` with `highlighter` and the configured options.
fn render_document<H: HighlightAdapter>(
    highlighter: H,
    config: &Config,
    text: &str,
) -> RenderResult {
    let markdown = CmarkAdapter::new().with_gfm(config.render.gfm);
    Markdownizer::new(highlighter, markdown).render(
        text,
        config.render.hierarchy,
        &config.render_options(),
    )
}

/// Read the document from `path`, or stdin when absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
