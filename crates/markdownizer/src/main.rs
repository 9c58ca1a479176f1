//! Markdownizer CLI - Markdown with highlighted code fences.
//!
//! Provides commands for:
//! - `render`: Render a Markdown document to HTML
//! - `install`: Write the code highlighting stylesheet
//! - `themes`: List the available highlighting themes

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{InstallArgs, RenderArgs};
use output::Output;

/// Markdownizer - Markdown with highlighted code fences.
#[derive(Parser)]
#[command(name = "markdownizer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown document to HTML.
    Render(RenderArgs),
    /// Write the code highlighting stylesheet.
    Install(InstallArgs),
    /// List the available highlighting themes.
    Themes,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for render command
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Install(args) => args.execute(),
        Commands::Themes => commands::themes::execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
