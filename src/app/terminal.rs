use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

static RESTORE_ON_PANIC: Once = Once::new();

/// Owns the terminal for the lifetime of the UI. Raw mode and the
/// alternate screen are entered on construction and undone on drop; a
/// panic hook covers the unwind path so a crash never leaves the shell
/// in raw mode.
pub(crate) struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen)
            .context("could not enter the alternate screen")?;
        RESTORE_ON_PANIC.call_once(|| {
            let inner = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                restore();
                inner(info);
            }));
        });
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("could not initialize the terminal")?;
        Ok(Self { terminal })
    }

    /// Render one frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal.draw(render).context("failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = terminal::disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}
