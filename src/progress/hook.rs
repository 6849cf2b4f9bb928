//! Printing above a running bar.
//!
//! Text written through a [`BarWriter`] while the bar runs is buffered until
//! a line is complete, then printed above the bar with an `on N: ` header
//! (when enriched). Continuation lines of a multi-line block are indented
//! under the header. The bar is redrawn below right away.
//!
//! The most recent bar is also registered as the active route for log
//! records: [`LogRoute`] sends them to that bar, or to stderr when none is
//! running.

use std::io::{self, Write};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use super::Shared;

/// How long a log record waits for a busy bar before going to stderr.
const LOG_LOCK_TIMEOUT: Duration = Duration::from_millis(50);

static ACTIVE: Mutex<Option<Weak<Shared>>> = parking_lot::const_mutex(None);

/// Line buffering and headers of captured text.
#[derive(Debug, Default)]
pub struct HookManager {
    enrich: bool,
    installed: bool,
    buffer: String,
}

impl HookManager {
    /// A manager adding `on N: ` headers when `enrich` is set.
    pub fn new(enrich: bool) -> Self {
        Self {
            enrich,
            ..Self::default()
        }
    }

    /// Start capturing.
    pub fn install(&mut self) {
        self.installed = true;
    }

    /// Stop capturing; text then goes straight to the terminal.
    pub fn uninstall(&mut self) {
        self.installed = false;
    }

    /// True while capturing.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// True when part of a line is waiting for its end.
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// The header of a block printed at position `pos`.
    pub fn header(&self, pos: &str) -> String {
        if self.enrich {
            format!("on {pos}: ")
        } else {
            String::new()
        }
    }

    /// Buffer `part`, returning the block to print once a line is complete.
    pub fn write(&mut self, part: &str, pos: &str) -> Option<String> {
        self.buffer.push_str(part);
        if self.buffer.ends_with('\n') {
            Some(self.take_block(pos))
        } else {
            None
        }
    }

    /// Return whatever is buffered as a complete block.
    pub fn flush_buffers(&mut self, pos: &str) -> Option<String> {
        self.has_pending().then(|| self.take_block(pos))
    }

    fn take_block(&mut self, pos: &str) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        let body = buffer.trim();
        if body.is_empty() {
            return "\n".to_string();
        }
        let header = self.header(pos);
        let indent = format!("\n{}", " ".repeat(header.chars().count()));
        format!("{header}{}\n", body.replace('\n', &indent))
    }
}

/// Register `shared` as the route of log records, returning the previous
/// one so nested bars can restore it.
pub(crate) fn activate(shared: &Arc<Shared>) -> Option<Weak<Shared>> {
    ACTIVE.lock().replace(Arc::downgrade(shared))
}

/// Restore the route that was active before `shared` started.
pub(crate) fn deactivate(shared: &Arc<Shared>, previous: Option<Weak<Shared>>) {
    let mut active = ACTIVE.lock();
    let is_current = active
        .as_ref()
        .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(shared)));
    if is_current {
        *active = previous;
    }
}

fn active() -> Option<Arc<Shared>> {
    ACTIVE.lock().as_ref().and_then(Weak::upgrade)
}

/// Decode what can be decoded, returning the text and the bytes consumed.
fn decode(buf: &[u8]) -> (String, usize) {
    match std::str::from_utf8(buf) {
        Ok(text) => (text.to_string(), buf.len()),
        Err(e) if e.valid_up_to() > 0 => {
            let valid = e.valid_up_to();
            (String::from_utf8_lossy(&buf[..valid]).into_owned(), valid)
        }
        Err(_) => (String::from_utf8_lossy(buf).into_owned(), buf.len()),
    }
}

/// A writer printing above one bar.
///
/// After the bar finished, writes go straight to its terminal.
#[derive(Clone)]
pub struct BarWriter {
    shared: Arc<Shared>,
}

impl BarWriter {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

impl std::fmt::Debug for BarWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarWriter").finish_non_exhaustive()
    }
}

impl Write for BarWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (text, consumed) = decode(buf);
        self.shared.print(&text);
        Ok(consumed)
    }

    /// Print a pending partial line.
    fn flush(&mut self) -> io::Result<()> {
        self.shared.flush_hook();
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BarWriter {
    type Writer = BarWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes log records above the active bar, or to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRoute;

/// Writer returned by [`LogRoute`].
#[derive(Debug)]
pub struct RoutedWriter {
    _private: (),
}

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(shared) = active() {
            let (text, consumed) = decode(buf);
            if shared.try_print(&text, LOG_LOCK_TIMEOUT) {
                return Ok(consumed);
            }
        }
        io::stderr().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for LogRoute {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriter { _private: () }
    }
}
