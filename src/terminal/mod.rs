//! Terminal abstraction used by the renderers and the live engine.
//!
//! The bar never writes to stdout directly. It goes through a [`Terminal`],
//! chosen once per session:
//!
//! - [`TtyTerminal`] for interactive terminals (ANSI control via crossterm)
//! - [`NonTtyTerminal`] for pipes and files: no control sequences, no
//!   truncation, only the final receipt is meaningful
//! - [`VoidTerminal`] when the bar is disabled
//! - [`MemoryTerminal`] to capture output in tests or embedders

mod memory;
mod plain;
mod tty;

use std::sync::Arc;

use crossterm::tty::IsTty;

pub use memory::MemoryTerminal;
pub use plain::{NonTtyTerminal, VoidTerminal};
pub use tty::TtyTerminal;

/// A line-oriented output sink.
///
/// Implementations swallow I/O errors: a progress bar must never abort the
/// work it is reporting on.
pub trait Terminal: Send + Sync {
    /// Write text without flushing.
    fn write(&self, text: &str);

    /// Flush pending output.
    fn flush(&self);

    /// Number of columns available for a line.
    fn cols(&self) -> usize;

    /// Move to the start of the current line.
    fn carriage_return(&self);

    /// Erase the whole current line and return to its start.
    fn clear_line(&self);

    /// Erase from the cursor to the end of the line.
    fn clear_end(&self);

    /// Hide the cursor.
    fn hide_cursor(&self);

    /// Show the cursor.
    fn show_cursor(&self);

    /// True when animations can be drawn in place.
    fn is_interactive(&self) -> bool;

    /// Write text and flush immediately.
    fn emit(&self, text: &str) {
        self.write(text);
        self.flush();
    }
}

/// Pick the terminal for a session.
///
/// `force_tty` overrides detection: `Some(true)` animates even when stdout
/// is not a terminal, `Some(false)` never animates. A disabled bar gets a
/// [`VoidTerminal`]. `fallback_cols` is used when the width cannot be read.
pub fn select(force_tty: Option<bool>, disable: bool, fallback_cols: usize) -> Arc<dyn Terminal> {
    if disable {
        return Arc::new(VoidTerminal);
    }
    let interactive = force_tty.unwrap_or_else(|| std::io::stdout().is_tty());
    if interactive {
        Arc::new(TtyTerminal::new(fallback_cols))
    } else {
        Arc::new(NonTtyTerminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_disabled_is_void() {
        let term = select(Some(true), true, 80);
        assert!(!term.is_interactive());
        assert_eq!(term.cols(), usize::MAX);
    }

    #[test]
    fn test_select_forced_tty_is_interactive() {
        let term = select(Some(true), false, 80);
        assert!(term.is_interactive());
    }

    #[test]
    fn test_select_forced_non_tty() {
        let term = select(Some(false), false, 80);
        assert!(!term.is_interactive());
    }
}
