//! Terminal UI consumers of the loading bus
//!
//! - [`overlay`] - centered loading popup drawn while the bus is visible
//! - [`PageLoadSentry`] - mount/unmount bus registration for views
//! - [`runner`] - demo event loop wiring the bus, provider, and fetches

mod events;
pub mod overlay;
mod runner;
mod sentry;

pub use events::{Event, EventHandler};
pub use runner::run_demo;
pub use sentry::PageLoadSentry;

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
