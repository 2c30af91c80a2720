//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use bookfind_core::SearchController;
use bookfind_search::{OpenLibraryClient, DEFAULT_BASE_URL};

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Browse subcommand arguments
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Base URL of the search API (for mirrors and tests)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the browse TUI
pub async fn run(args: BrowseArgs) -> Result<()> {
    debug!(base_url = %args.base_url, "starting browse mode");
    let client = Arc::new(OpenLibraryClient::with_base_url(&args.base_url));
    let controller = SearchController::new(client);
    let mut app = App::new(controller);

    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Apply any fetches that completed since the last tick. The
        // fetch tasks run on the runtime's worker threads; this loop
        // only blocks on terminal input.
        app.tick();

        // Render UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (with 100ms timeout for responsive updates)
        if let Some(event) = poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => match handle_key(app, key) {
                    HandleResult::Quit => break,
                    HandleResult::Continue => {}
                },
                Event::Resize(_, _) => {
                    // Terminal resized, will be handled on next draw
                }
                _ => {}
            }
        }
    }

    Ok(())
}
