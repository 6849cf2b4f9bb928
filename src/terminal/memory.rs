use std::sync::Arc;

use parking_lot::Mutex;

use super::Terminal;

/// An in-memory terminal that records everything written to it.
///
/// In interactive mode control operations are recorded as their ANSI
/// sequences, so the captured text reads like what a real terminal received.
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct MemoryTerminal {
    buffer: Arc<Mutex<String>>,
    cols: usize,
    interactive: bool,
}

impl MemoryTerminal {
    /// An interactive terminal with the given width.
    pub fn interactive(cols: usize) -> Self {
        Self {
            buffer: Arc::default(),
            cols,
            interactive: true,
        }
    }

    /// A non-interactive terminal: no control sequences, unbounded width.
    pub fn non_interactive() -> Self {
        Self {
            buffer: Arc::default(),
            cols: usize::MAX,
            interactive: false,
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    /// The captured output with control sequences removed and carriage
    /// returns resolved, as a person would read it after the run.
    pub fn screen(&self) -> String {
        let raw = self.contents();
        let stripped = raw
            .replace("\x1b[2K", "")
            .replace("\x1b[K", "")
            .replace("\x1b[?25l", "")
            .replace("\x1b[?25h", "");
        stripped
            .split('\n')
            .map(|line| line.rsplit('\r').find(|s| !s.is_empty()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn control(&self, sequence: &str) {
        if self.interactive {
            self.buffer.lock().push_str(sequence);
        }
    }
}

impl Terminal for MemoryTerminal {
    fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    fn flush(&self) {}

    fn cols(&self) -> usize {
        self.cols
    }

    fn carriage_return(&self) {
        self.control("\r");
    }

    fn clear_line(&self) {
        self.control("\x1b[2K\r");
    }

    fn clear_end(&self) {
        self.control("\x1b[K");
    }

    fn hide_cursor(&self) {
        self.control("\x1b[?25l");
    }

    fn show_cursor(&self) {
        self.control("\x1b[?25h");
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
