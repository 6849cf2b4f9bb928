use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use super::Terminal;

/// An interactive terminal on stdout.
#[derive(Debug, Clone)]
pub struct TtyTerminal {
    fallback_cols: usize,
}

impl TtyTerminal {
    /// Create a terminal that reports `fallback_cols` when its size is unknown.
    pub fn new(fallback_cols: usize) -> Self {
        Self { fallback_cols }
    }
}

impl Terminal for TtyTerminal {
    fn write(&self, text: &str) {
        let _ = io::stdout().lock().write_all(text.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }

    fn cols(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) if cols > 0 => cols as usize,
            _ => self.fallback_cols,
        }
    }

    fn carriage_return(&self) {
        self.write("\r");
    }

    fn clear_line(&self) {
        let mut out = io::stdout().lock();
        let _ = queue!(out, Clear(ClearType::CurrentLine));
        let _ = out.write_all(b"\r");
    }

    fn clear_end(&self) {
        let _ = queue!(io::stdout(), Clear(ClearType::UntilNewLine));
    }

    fn hide_cursor(&self) {
        let _ = execute!(io::stdout(), Hide);
    }

    fn show_cursor(&self) {
        let _ = execute!(io::stdout(), Show);
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
