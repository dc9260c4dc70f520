#![forbid(unsafe_code)]

//! Terminal control for spinner diagnostics.
//!
//! Thin wrappers over the Crossterm backend: cursor visibility, current
//! line clearing, and column count. Every operation is a no-op when
//! stdout is not an interactive terminal, so diagnostic code never leaks
//! escape sequences into pipes or logs.
//!
//! Failures writing escape sequences are swallowed (`let _ =`): there is
//! nothing useful to do about a failed cursor toggle, and cleanup paths
//! must never themselves fail.

use std::io::{self, IsTerminal, Write};

/// Column count reported when stdout is not a terminal.
///
/// Effectively unbounded so callers never truncate off-tty; half of
/// `usize::MAX` keeps downstream additions free of overflow.
pub const UNBOUNDED_COLUMNS: usize = usize::MAX / 2;

fn interactive() -> bool {
    io::stdout().is_terminal()
}

/// Hide the cursor (`CSI ? 25 l`).
pub fn hide_cursor() {
    if interactive() {
        let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Hide);
    }
}

/// Show the cursor (`CSI ? 25 h`).
pub fn show_cursor() {
    if interactive() {
        let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Show);
    }
}

/// Clear the current line (`CSI 2 K`) and return to column 0.
pub fn clear_line() {
    if interactive() {
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::Clear(crossterm::terminal::ClearType::CurrentLine),
            crossterm::cursor::MoveToColumn(0),
        );
        let _ = io::stdout().flush();
    }
}

/// Current terminal width in columns.
///
/// Returns [`UNBOUNDED_COLUMNS`] when stdout is not a terminal or the
/// size query fails.
#[must_use]
pub fn columns() -> usize {
    if interactive() {
        crossterm::terminal::size()
            .map(|(cols, _rows)| cols as usize)
            .unwrap_or(UNBOUNDED_COLUMNS)
    } else {
        UNBOUNDED_COLUMNS
    }
}

/// RAII guard that hides the cursor and restores it on drop.
///
/// Because restoration lives in [`Drop`], it runs on normal scope exit,
/// on `?` propagation, and during panic unwinding, so a replay loop can
/// never leave the cursor hidden.
#[derive(Debug)]
pub struct CursorGuard {
    _private: (),
}

impl CursorGuard {
    /// Hide the cursor until the returned guard is dropped.
    #[must_use]
    pub fn hide() -> Self {
        hide_cursor();
        Self { _private: () }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        show_cursor();
    }
}
