//! The live progress bar.
//!
//! An [`AliveBar`] owns a session: the counters, the compiled bar and
//! spinner, and, on interactive terminals, a refresh thread redrawing the
//! line at a rate calibrated to the throughput. Everything that touches the
//! terminal happens under the session lock, so captured prints, log records
//! and frames never interleave.
//!
//! Two modes exist. Counting bars advance with [`AliveBar::inc`]; manual
//! bars are set with [`AliveBar::set_percent`]. Either may have a total.
//! Without one, counting bars play the unknown spinner inside the bar and
//! manual bars report bare percentages.
//!
//! Finishing, explicitly or on drop, stops the thread and prints the
//! receipt: the final line with precise elapsed time and average rate.

pub mod calibration;
pub mod hook;
pub mod timing;
pub mod widgets;

use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, error, warn};

use crate::animations::{AnimationError, BarError, BarRenderer, SpinnerPlayer};
use crate::cells::{print_cells, to_cells, Cells};
use crate::config::Config;
use crate::terminal::{self, Terminal};

use calibration::{Calibration, COUNTING_CALIBRATION, PERCENT_CALIBRATION};
pub use hook::{BarWriter, HookManager, LogRoute};
use timing::{EtaSmoother, Stopwatch, ETA_ALPHA};
use widgets::Snapshot;

/// Errors raised by a progress session.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// An operation of the other mode was called.
    #[error("{operation} is not available on {mode} bars")]
    WrongMode {
        /// The rejected operation.
        operation: &'static str,
        /// The mode of the bar.
        mode: &'static str,
    },

    /// The bar style could not be compiled.
    #[error(transparent)]
    Bar(#[from] BarError),

    /// The spinner could not be compiled.
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// The refresh thread could not be started.
    #[error("Failed to start the refresh thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Counting,
    Manual,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Counting => "counting",
            Mode::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Paused,
    Stopping,
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    title_length: usize,
    monitor: bool,
    elapsed: bool,
    stats: bool,
    receipt: bool,
    receipt_text: bool,
}

/// Mutable state of a session, guarded by the session lock.
struct RunState {
    mode: Mode,
    total: Option<u64>,
    count: u64,
    percent: f64,
    rate: f64,
    text: Option<String>,
    title: Option<Cells>,
    phase: Phase,
    last_len: usize,
    stopwatch: Stopwatch,
    eta: EtaSmoother,
    calibration: Calibration,
    bar: Option<BarRenderer>,
    spinner: Option<SpinnerPlayer>,
    hook: HookManager,
    layout: Layout,
}

impl RunState {
    /// Derive the count from the percentage, or the other way around.
    fn sync(&mut self) {
        match (self.mode, self.total) {
            (Mode::Manual, Some(total)) => {
                self.count = (self.percent * total as f64).ceil().max(0.0) as u64;
            }
            (Mode::Counting, Some(total)) => self.percent = self.count as f64 / total as f64,
            (Mode::Counting, None) => self.percent = 1.0,
            (Mode::Manual, None) => {}
        }
    }

    /// The measure rates and etas are computed on.
    fn current(&self) -> f64 {
        match (self.mode, self.total) {
            (Mode::Manual, None) => self.percent,
            _ => self.count as f64,
        }
    }

    /// Position shown in the header of captured prints.
    fn position(&mut self) -> String {
        self.sync();
        match (self.mode, self.total) {
            (Mode::Manual, None) => format!("{:.0}%", self.percent * 100.0),
            _ => self.count.to_string(),
        }
    }

    fn snapshot(&self, end: bool) -> Snapshot {
        Snapshot {
            count: self.count,
            total: self.total,
            percent: self.percent,
            manual: self.mode == Mode::Manual,
            end,
        }
    }

    /// Draw the line. Live frames advance the spinner and stay on the
    /// line; pause and receipt lines end with a line feed.
    fn render(&mut self, term: &dyn Terminal, live: bool, end: bool) {
        self.sync();
        let elapsed = self.stopwatch.elapsed().as_secs_f64();
        let current = self.current();
        self.rate = if elapsed > 0.0 { current / elapsed } else { 0.0 };
        let snap = self.snapshot(end);

        let mut fragments: Vec<Cells> = Vec::with_capacity(7);
        if let Some(title) = &self.title {
            fragments.push(title.clone());
        }
        if let Some(bar) = self.bar.as_mut() {
            fragments.push(bar.render(self.percent, end));
        }
        if live {
            if let Some(spinner) = self.spinner.as_mut() {
                fragments.push(spinner.next_frame());
            }
        }
        if self.layout.monitor {
            fragments.push(to_cells(&widgets::monitor(&snap)));
        }
        if self.layout.elapsed {
            fragments.push(to_cells(&widgets::elapsed(elapsed, end)));
        }
        if self.layout.stats {
            let eta = if end {
                None
            } else {
                self.eta.update(current, self.rate)
            };
            fragments.push(to_cells(&widgets::stats(&snap, self.rate, eta)));
        }
        if !end || self.layout.receipt_text {
            if let Some(text) = &self.text {
                fragments.push(to_cells(text));
            }
        }

        let refs: Vec<&Cells> = fragments.iter().collect();
        self.last_len = print_cells(&refs, term.cols(), self.last_len, term);
        if !live {
            term.write("\n");
            self.last_len = 0;
        }
        term.flush();
    }

    fn interval(&self) -> Duration {
        self.calibration.interval(self.rate)
    }
}

/// State shared between the bar handle, its writers and the refresh thread.
pub(crate) struct Shared {
    state: Mutex<RunState>,
    wake: Condvar,
    term: Arc<dyn Terminal>,
}

impl Shared {
    /// Print `text` above the bar, or straight through once it finished.
    pub(crate) fn print(&self, text: &str) {
        let mut state = self.state.lock();
        self.print_locked(&mut state, text);
    }

    /// Like [`print`](Self::print), giving up when the lock stays busy.
    pub(crate) fn try_print(&self, text: &str, timeout: Duration) -> bool {
        match self.state.try_lock_for(timeout) {
            Some(mut state) => {
                self.print_locked(&mut state, text);
                true
            }
            None => false,
        }
    }

    /// Print a pending partial line.
    pub(crate) fn flush_hook(&self) {
        let mut state = self.state.lock();
        self.flush_locked(&mut state);
    }

    fn print_locked(&self, state: &mut MutexGuard<'_, RunState>, text: &str) {
        if !state.hook.is_installed() {
            self.term.emit(text);
            return;
        }
        let pos = state.position();
        if let Some(block) = state.hook.write(text, &pos) {
            self.emit_block(state, &block);
        }
    }

    fn flush_locked(&self, state: &mut MutexGuard<'_, RunState>) {
        if !state.hook.has_pending() {
            return;
        }
        let pos = state.position();
        if let Some(block) = state.hook.flush_buffers(&pos) {
            self.emit_block(state, &block);
        }
    }

    fn emit_block(&self, state: &mut MutexGuard<'_, RunState>, block: &str) {
        self.term.clear_line();
        self.term.write(block);
        self.term.flush();
        state.last_len = 0;
        self.wake.notify_all();
    }
}

fn refresh_loop(shared: Arc<Shared>) {
    let mut state = shared.state.lock();
    loop {
        match state.phase {
            Phase::Stopping => break,
            Phase::Paused => shared.wake.wait(&mut state),
            Phase::Running => {
                state.render(&*shared.term, true, false);
                let interval = state.interval();
                shared.wake.wait_for(&mut state, interval);
            }
        }
    }
}

/// A running progress bar.
///
/// ```no_run
/// use alive_progress::{AliveBar, Config};
///
/// let bar = AliveBar::start(Some(100), &Config::default())?;
/// for _ in 0..100 {
///     bar.inc(1)?;
/// }
/// bar.finish();
/// # Ok::<(), alive_progress::ProgressError>(())
/// ```
pub struct AliveBar {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
    previous_route: Option<Weak<Shared>>,
    interactive: bool,
    finished: bool,
}

impl std::fmt::Debug for AliveBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliveBar")
            .field("interactive", &self.interactive)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl AliveBar {
    /// Start a bar on the terminal selected by the config.
    ///
    /// A total of `Some(0)` counts as unknown.
    pub fn start(total: Option<u64>, config: &Config) -> Result<Self, ProgressError> {
        let term = terminal::select(config.force_tty, config.disable, config.max_cols);
        Self::with_terminal(total, config, term)
    }

    /// Start a bar on a given terminal.
    pub fn with_terminal(
        total: Option<u64>,
        config: &Config,
        term: Arc<dyn Terminal>,
    ) -> Result<Self, ProgressError> {
        let total = total.filter(|&t| t > 0);
        let mode = if config.manual {
            Mode::Manual
        } else {
            Mode::Counting
        };

        let bar = match (&config.bar, mode, total) {
            (None, ..) => None,
            (Some(factory), Mode::Counting, None) => Some(match &config.unknown {
                Some(unknown) => BarRenderer::Unknown(factory.compile_unknown(unknown, config.length)?),
                None => BarRenderer::Known(factory.compile(config.length)?),
            }),
            (Some(factory), ..) => Some(BarRenderer::Known(factory.compile(config.length)?)),
        };
        let spinner = match &config.spinner {
            Some(factory) => {
                let length = (config.spinner_length > 0).then_some(config.spinner_length);
                Some(factory.compile(length)?.into_player())
            }
            None => None,
        };

        let (default_calibration, logic_total) = match (mode, total) {
            (Mode::Manual, None) => (PERCENT_CALIBRATION, 1.0),
            (_, total) => (COUNTING_CALIBRATION, total.unwrap_or(0) as f64),
        };

        let mut hook = HookManager::new(config.enrich_print);
        hook.install();

        let state = RunState {
            mode,
            total,
            count: 0,
            percent: 0.0,
            rate: 0.0,
            text: None,
            title: config
                .title
                .as_deref()
                .map(|t| widgets::render_title(t, config.title_length)),
            phase: Phase::Running,
            last_len: 0,
            stopwatch: Stopwatch::started(),
            eta: EtaSmoother::new(ETA_ALPHA, logic_total),
            calibration: Calibration::new(config.calibrate, default_calibration, config.refresh_secs),
            bar,
            spinner,
            hook,
            layout: Layout {
                title_length: config.title_length,
                monitor: config.monitor,
                elapsed: config.elapsed,
                stats: config.stats,
                receipt: config.receipt,
                receipt_text: config.receipt_text,
            },
        };

        let interactive = term.is_interactive();
        let shared = Arc::new(Shared {
            state: Mutex::new(state),
            wake: Condvar::new(),
            term,
        });

        debug!(
            total = ?total,
            mode = mode.name(),
            interactive,
            "Starting progress bar"
        );

        let thread = if interactive {
            shared.term.hide_cursor();
            let worker = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name("alive-refresh".into())
                .spawn(move || refresh_loop(worker));
            match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    shared.term.show_cursor();
                    return Err(e.into());
                }
            }
        } else {
            None
        };
        let previous_route = hook::activate(&shared);

        Ok(Self {
            shared,
            thread,
            previous_route,
            interactive,
            finished: false,
        })
    }

    fn require(&self, state: &RunState, mode: Mode, operation: &'static str) -> Result<(), ProgressError> {
        if state.mode == mode {
            Ok(())
        } else {
            Err(ProgressError::WrongMode {
                operation,
                mode: state.mode.name(),
            })
        }
    }

    /// Count `n` more items.
    pub fn inc(&self, n: u64) -> Result<(), ProgressError> {
        let mut state = self.shared.state.lock();
        self.require(&state, Mode::Counting, "inc")?;
        if n > 0 {
            self.shared.flush_locked(&mut state);
            state.count = state.count.saturating_add(n);
        }
        Ok(())
    }

    /// Set the completion of a manual bar, 1.0 meaning done.
    pub fn set_percent(&self, percent: f64) -> Result<(), ProgressError> {
        let mut state = self.shared.state.lock();
        self.require(&state, Mode::Manual, "set_percent")?;
        if !percent.is_finite() {
            drop(state);
            warn!(percent, "Ignoring a percentage that is not finite");
            return Ok(());
        }
        self.shared.flush_locked(&mut state);
        state.percent = percent;
        Ok(())
    }

    /// Show a message after the widgets. Whitespace runs collapse.
    pub fn text(&self, message: impl AsRef<str>) {
        self.shared.state.lock().text = Some(widgets::sanitize_text(message.as_ref()));
    }

    /// Remove the message.
    pub fn clear_text(&self) {
        self.shared.state.lock().text = None;
    }

    /// Change the title shown before the bar.
    pub fn title(&self, title: impl AsRef<str>) {
        let mut state = self.shared.state.lock();
        let length = state.layout.title_length;
        state.title = Some(widgets::render_title(
            &widgets::sanitize_text(title.as_ref()),
            length,
        ));
    }

    /// Items counted so far; derived from the percentage on manual bars.
    pub fn count(&self) -> u64 {
        let mut state = self.shared.state.lock();
        state.sync();
        state.count
    }

    /// Completion so far, 1.0 meaning done.
    pub fn percent(&self) -> f64 {
        let mut state = self.shared.state.lock();
        state.sync();
        state.percent
    }

    /// Time spent running, pauses excluded.
    pub fn elapsed(&self) -> Duration {
        self.shared.state.lock().stopwatch.elapsed()
    }

    /// True when the bar animates in place.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// A writer printing above this bar.
    pub fn writer(&self) -> BarWriter {
        BarWriter::new(Arc::clone(&self.shared))
    }

    /// Print a line above the bar.
    pub fn println(&self, line: impl AsRef<str>) {
        self.shared.print(&format!("{}\n", line.as_ref()));
    }

    /// Suspend the bar until the guard is dropped.
    ///
    /// The clock stops, the current line is left on screen and prints go
    /// straight to the terminal.
    pub fn pause(&self) -> PauseGuard<'_> {
        let mut state = self.shared.state.lock();
        let paused = state.phase == Phase::Running;
        if paused {
            self.shared.flush_locked(&mut state);
            state.phase = Phase::Paused;
            state.stopwatch.pause();
            if self.interactive {
                state.render(&*self.shared.term, false, false);
                self.shared.term.show_cursor();
                self.shared.term.flush();
            }
            state.hook.uninstall();
        }
        drop(state);
        self.shared.wake.notify_all();
        debug!(paused, "Pausing progress bar");
        PauseGuard { bar: self, paused }
    }

    /// Stop the bar and print the receipt.
    pub fn finish(mut self) {
        self.finalize();
    }

    fn finalize(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        {
            let mut state = self.shared.state.lock();
            self.shared.flush_locked(&mut state);
            state.phase = Phase::Stopping;
            state.stopwatch.pause();
        }
        self.shared.wake.notify_all();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                error!("Progress refresh thread panicked");
            }
        }
        hook::deactivate(&self.shared, self.previous_route.take());

        let term = &*self.shared.term;
        let mut state = self.shared.state.lock();
        state.hook.uninstall();
        if state.layout.receipt {
            state.render(term, false, true);
        } else if self.interactive {
            term.clear_line();
        }
        if self.interactive {
            term.show_cursor();
        }
        term.flush();
        let (count, elapsed) = (state.count, state.stopwatch.elapsed());
        drop(state);
        debug!(count, elapsed = ?elapsed, "Finished progress bar");
    }
}

impl Drop for AliveBar {
    fn drop(&mut self) {
        self.finalize();
    }
}

/// Resumes a paused bar when dropped.
#[must_use = "the bar resumes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct PauseGuard<'a> {
    bar: &'a AliveBar,
    paused: bool,
}

impl Drop for PauseGuard<'_> {
    fn drop(&mut self) {
        if !self.paused {
            return;
        }
        let shared = &self.bar.shared;
        {
            let mut state = shared.state.lock();
            state.hook.install();
            state.stopwatch.resume();
            state.phase = Phase::Running;
            if self.bar.interactive {
                shared.term.hide_cursor();
            }
        }
        shared.wake.notify_all();
    }
}

/// Run `work` with a bar, finishing it afterwards.
///
/// The bar also finishes when `work` panics, leaving the terminal clean.
pub fn with_alive_bar<R>(
    total: Option<u64>,
    config: &Config,
    work: impl FnOnce(&AliveBar) -> R,
) -> Result<R, ProgressError> {
    let bar = AliveBar::start(total, config)?;
    let result = work(&bar);
    bar.finish();
    Ok(result)
}
