//! # folio
//!
//! A terminal reader for structured JSON book libraries.
//!
//! ## Usage
//!
//! Open the interactive reader on a library root:
//! ```sh
//! folio ~/books/physics
//! ```
//!
//! Print the table of contents:
//! ```sh
//! folio --tree ~/books/physics
//! ```
//!
//! List all chapters:
//! ```sh
//! folio -l ~/books/physics
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use folio::assets::AssetPaths;
use folio::library::{Library, section_heading};
use folio::{App, Config};
use std::process;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let assets = AssetPaths::new(&args.root);
    let library = match Library::load(&assets.library_index()) {
        Ok(library) => library,
        Err(e) => {
            // Startup load failure is fatal for the session.
            eprintln!("Failed to load content: {e:#}");
            process::exit(1);
        }
    };

    // Handle non-interactive modes
    if args.tree || args.list {
        handle_cli_mode(&args, &library);
        return Ok(());
    }

    let mut config = Config::load();
    if args.collapsed {
        // CLI flag overrides the persisted preference for this run only
        config.ui.sidebar_collapsed = true;
    }

    // Initialize terminal with explicit error handling
    use crossterm::ExecutableCommand;
    use crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    };
    use std::io::stdout;

    enable_raw_mode().inspect_err(|e| {
        eprintln!("Failed to enable raw mode: {}", e);
    })?;

    stdout().execute(EnterAlternateScreen).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let mut app = App::new(library, assets, config);
    app.load_initial_chapter();
    let result = folio::tui::run(&mut terminal, app);

    // Cleanup terminal state
    stdout().execute(LeaveAlternateScreen).ok();
    disable_raw_mode().ok();

    result
}

fn handle_cli_mode(args: &Cli, library: &Library) {
    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(library).unwrap();
            println!("{}", json);
        }
        OutputFormat::Plain if args.tree => print_tree(library),
        OutputFormat::Plain => print_chapters(library),
    }
}

fn print_tree(library: &Library) {
    for book in &library.books {
        println!("{}", book.title);
        for (idx, chapter) in book.chapters.iter().enumerate() {
            println!("  {}. {}", idx + 1, chapter.title);
            for section in &chapter.sections {
                let heading = section_heading(&section.title, &section.id);
                match heading.marker {
                    Some(marker) => println!("     {:<6} {}", marker, heading.title),
                    None => println!("     {}", heading.title),
                }
            }
        }
    }
}

fn print_chapters(library: &Library) {
    for book in &library.books {
        for (idx, chapter) in book.chapters.iter().enumerate() {
            println!("{}: {}. {}", book.title, idx + 1, chapter.title);
        }
    }
}
