//! Command implementations for the alive CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod check;
pub mod config;
pub mod demo;
pub mod showtime;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use crate::terminal::Terminal;

/// Frame rate of the CLI animations.
pub const ANIMATION_FPS: u32 = 15;

/// Flag raised by Ctrl+C.
///
/// The handler is installed on first use and shared by every command.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();
    FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        let handler_result = ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        });
        if let Err(e) = handler_result {
            // Non-fatal: animations then only stop on their own
            eprintln!("\x1b[2mWarning: Could not set up Ctrl+C handler: {e}\x1b[0m");
        }
        flag
    })
    .clone()
}

/// Call `frame` at [`ANIMATION_FPS`] until Ctrl+C or `seconds` elapse.
///
/// `frame` receives the time since the start, in seconds. The cursor is
/// hidden meanwhile and always restored.
pub fn animate(term: &dyn Terminal, seconds: Option<f64>, mut frame: impl FnMut(&dyn Terminal, f64)) {
    let interrupted = interrupt_flag();
    let interval = Duration::from_secs_f64(1.0 / f64::from(ANIMATION_FPS));
    let started = Instant::now();

    term.hide_cursor();
    loop {
        let t = started.elapsed().as_secs_f64();
        if interrupted.load(Ordering::SeqCst) || seconds.is_some_and(|limit| t >= limit) {
            break;
        }
        frame(term, t);
        term.flush();
        std::thread::sleep(interval);
    }
    term.show_cursor();
    term.emit("\n");
}
