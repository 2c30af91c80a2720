//! bookfind CLI - OpenLibrary title search
//!
//! Entry point for the `bookfind` command-line tool:
//! - One-shot paginated title search (`search` subcommand)
//! - Interactive browse mode with next/previous page navigation
//!   (`browse` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod tracing_setup;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "bookfind",
    author,
    version,
    about = "Search the OpenLibrary book catalog by title",
    long_about = "Search the OpenLibrary book catalog by title, with paginated \
                  results, cover URLs, and an interactive browse mode."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one page of title matches and print it
    Search(bookfind_search::SearchArgs),
    /// Browse search results interactively (TUI)
    Browse(tui::BrowseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Search(args) => bookfind_search::run_search(args).await?,
        Commands::Browse(args) => tui::run(args).await?,
    }

    Ok(())
}
