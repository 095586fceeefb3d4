use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line interface for folio
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "A terminal reader for structured JSON book libraries",
    long_about = "folio renders a library of JSON books as a navigable terminal reader: \
                  a collapsible sidebar of books, chapters, and sections, and a content \
                  pane with math-aware text formatting.\n\n\
                  With no flags, folio opens the interactive TUI."
)]
pub struct Cli {
    /// Library root directory (contains data/ and images/)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Print the library outline as a tree and exit
    #[arg(short = 't', long)]
    pub tree: bool,

    /// List every chapter and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Output format for --tree and --list
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Start with the sidebar hidden (overrides the saved preference)
    #[arg(long)]
    pub collapsed: bool,
}

/// Output format for non-interactive modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Plain,
    /// Pretty-printed JSON
    Json,
}
