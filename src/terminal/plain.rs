use std::io::{self, Write};

use super::Terminal;

/// Plain stdout without control sequences, for pipes and files.
///
/// Lines are never truncated and never redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonTtyTerminal;

impl Terminal for NonTtyTerminal {
    fn write(&self, text: &str) {
        let _ = io::stdout().lock().write_all(text.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }

    fn cols(&self) -> usize {
        usize::MAX
    }

    fn carriage_return(&self) {}

    fn clear_line(&self) {}

    fn clear_end(&self) {}

    fn hide_cursor(&self) {}

    fn show_cursor(&self) {}

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidTerminal;

impl Terminal for VoidTerminal {
    fn write(&self, _text: &str) {}

    fn flush(&self) {}

    fn cols(&self) -> usize {
        usize::MAX
    }

    fn carriage_return(&self) {}

    fn clear_line(&self) {}

    fn clear_end(&self) {}

    fn hide_cursor(&self) {}

    fn show_cursor(&self) {}

    fn is_interactive(&self) -> bool {
        false
    }
}
