//! Terminal setup and restoration.
//!
//! Responsibilities:
//! - Enter raw mode and the alternate screen.
//! - Restore the terminal on drop, including during a panic unwind.
//!
//! Invariants:
//! - Drop never panics; restore errors are ignored there.

use std::io::Stdout;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// Restores the terminal when dropped.
///
/// Hold it for the whole session. `main` restores explicitly on normal exit;
/// the guard covers early returns and panics.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter(stdout: &mut Stdout) -> std::io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}
