//! bookfind-search - OpenLibrary client and `bookfind search` subcommand
//!
//! This crate provides:
//! - OpenLibrary Search API client (title search, paginated)
//! - CLI argument handling for the one-shot `bookfind search` command
//!
//! The interactive browse mode lives in bookfind-cli; it drives the
//! same client through the `SearchBackend` seam in bookfind-core.

pub mod openlibrary;

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;

use bookfind_core::{cover_url, page_offset, SearchPage, PAGE_SIZE};

pub use openlibrary::{OpenLibraryClient, DEFAULT_BASE_URL};

/// Search subcommand arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Title query (reads from stdin if not provided)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Page of results to fetch (1-based, 20 results per page)
    #[arg(short = 'p', long, default_value = "1")]
    pub page: u32,

    /// Output format (text, json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Base URL of the search API (for mirrors and tests)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Suppress progress spinner (for script consumption)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Output format options
#[derive(Debug, Clone, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

/// Helper to create a spinner (respects quiet mode and TTY)
fn spinner(msg: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Execute the search command
#[instrument(skip_all, fields(page = args.page))]
pub async fn run_search(args: SearchArgs) -> Result<()> {
    // Get query from args or stdin
    let query = if let Some(q) = args.query {
        q
    } else {
        use std::io::{self, BufRead};
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            lines.push(line?);
        }
        lines.join(" ")
    };

    if query.trim().is_empty() {
        anyhow::bail!("No query provided. Pass a title argument or pipe input via stdin.");
    }
    if args.page < 1 {
        anyhow::bail!("Page numbers start at 1.");
    }

    let client = OpenLibraryClient::with_base_url(&args.base_url);
    let offset = page_offset(args.page);

    let pb = spinner("Searching...", args.quiet);
    let page = client.search_titles(&query, PAGE_SIZE, offset).await?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let total_pages = total_pages(page.num_found);
    if page.num_found > 0 && args.page > total_pages {
        anyhow::bail!(
            "Page {} is beyond the last page ({}) for this query.",
            args.page,
            total_pages
        );
    }

    print_results(&query, args.page, &page, &args.format)
}

fn total_pages(num_found: u64) -> u32 {
    num_found.div_ceil(u64::from(PAGE_SIZE)).max(1) as u32
}

fn print_results(query: &str, page_no: u32, page: &SearchPage, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct JsonOutput<'a> {
                query: &'a str,
                page: u32,
                total_pages: u32,
                num_found: u64,
                docs: &'a [bookfind_core::BookSummary],
            }
            let json = JsonOutput {
                query,
                page: page_no,
                total_pages: total_pages(page.num_found),
                num_found: page.num_found,
                docs: &page.docs,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if page.docs.is_empty() {
                println!("No results found.");
                return Ok(());
            }
            let first = page_offset(page_no);
            for (i, book) in page.docs.iter().enumerate() {
                println!("{}. {}", first + i as u64 + 1, book.title);
                println!("   by {}", book.author_line());
                println!("   cover: {}", cover_url(book.cover_id));
                println!("   {}", book.key);
            }
            println!();
            println!(
                "Page {}/{} ({} matches)",
                page_no,
                total_pages(page.num_found),
                page.num_found
            );
        }
    }
    Ok(())
}
