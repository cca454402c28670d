use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

/// Holds the terminal in raw mode on the alternate screen.
///
/// Dropping the guard puts the terminal back the way it was, including when
/// the game returns an error or unwinds from a panic.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = stdout
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(Hide))
            .map(|_| ())
        {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        tracing::debug!("terminal switched to raw mode");
        Ok(Self { _private: () })
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(Show);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.flush();
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::warn!("failed to restore terminal: {}", err);
        } else {
            tracing::debug!("terminal restored");
        }
    }
}
