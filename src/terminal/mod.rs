//! Terminal lifecycle.
//!
//! [`TerminalManager`] puts the terminal into raw mode on the alternate
//! screen and restores it when dropped. [`setup_panic_hook`] covers the
//! panic path, where destructors may not get to run before the report is
//! printed.
//!
//! ```no_run
//! use packdeck::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     manager.terminal().draw(|_frame| {})?;
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use std::io::{self, Stdout};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};

pub type DeckTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal once, on drop or on [`TerminalGuard::cleanup`].
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { cleaned_up: false }
    }

    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        leave_tui_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub struct TerminalManager {
    terminal: DeckTerminal,
    guard: TerminalGuard,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        // From here on the guard owns the restore, even if setup fails.
        let guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut DeckTerminal {
        &mut self.terminal
    }

    /// Restore early, e.g. before printing a fatal error.
    pub fn restore(&mut self) {
        self.guard.cleanup();
    }
}
