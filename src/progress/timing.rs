//! Elapsed time, eta text and smoothing.

use std::time::{Duration, Instant};

/// Smoothing factor of the eta series.
pub const ETA_ALPHA: f64 = 0.5;

/// Format seconds as `42s`, `1:05` or `1:02:05`.
///
/// Precise mode (used by receipts) keeps one decimal: `42.3s`, `1:05.2`.
pub fn elapsed_text(seconds: f64, precise: bool) -> String {
    let seconds = if precise {
        (seconds * 10.0).round() / 10.0
    } else {
        seconds.round()
    };
    let (width, decimals) = if precise { (4, 1) } else { (2, 0) };

    if seconds < 60.0 {
        return format!("{seconds:.decimals$}s");
    }
    let minutes = (seconds / 60.0).floor();
    let secs = seconds - minutes * 60.0;
    if minutes < 60.0 {
        return format!("{minutes:.0}:{secs:0width$.decimals$}");
    }
    let hours = (minutes / 60.0).floor();
    let minutes = minutes - hours * 60.0;
    format!("{hours:.0}:{minutes:02.0}:{secs:0width$.decimals$}")
}

/// Format an eta, or `-` when unknown or negative.
pub fn eta_text(eta: Option<f64>) -> String {
    match eta {
        Some(eta) if eta >= 0.0 => elapsed_text(eta, false),
        _ => "-".to_string(),
    }
}

/// Simple exponential smoothing of the remaining time.
///
/// The first estimate is taken as soon as the rate is positive. Updates at
/// an unchanged position are ignored, so the eta does not bounce around
/// while nothing happens.
#[derive(Debug, Clone)]
pub struct EtaSmoother {
    alpha: f64,
    logic_total: f64,
    pos: f64,
    estimate: Option<f64>,
}

impl EtaSmoother {
    /// Smooth the eta of reaching `logic_total`.
    pub fn new(alpha: f64, logic_total: f64) -> Self {
        Self {
            alpha,
            logic_total,
            pos: 0.0,
            estimate: None,
        }
    }

    /// Feed the current position and rate, returning the smoothed eta.
    pub fn update(&mut self, pos: f64, rate: f64) -> Option<f64> {
        if rate <= 0.0 {
            return self.estimate;
        }
        let y = (self.logic_total - pos) / rate;
        match self.estimate {
            None => {
                self.pos = pos;
                self.estimate = Some(y);
            }
            Some(_) if pos == self.pos => {}
            Some(y_hat) => {
                self.pos = pos;
                self.estimate = Some(y_hat + self.alpha * (y - y_hat));
            }
        }
        self.estimate
    }
}

/// A pausable stopwatch.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    accumulated: Duration,
    since: Option<Instant>,
}

impl Stopwatch {
    /// A running stopwatch.
    pub fn started() -> Self {
        Self {
            accumulated: Duration::ZERO,
            since: Some(Instant::now()),
        }
    }

    /// Stop counting, keeping the time so far.
    pub fn pause(&mut self) {
        if let Some(since) = self.since.take() {
            self.accumulated += since.elapsed();
        }
    }

    /// Continue counting.
    pub fn resume(&mut self) {
        if self.since.is_none() {
            self.since = Some(Instant::now());
        }
    }

    /// True while counting.
    pub fn is_running(&self) -> bool {
        self.since.is_some()
    }

    /// Time counted so far.
    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.since.map_or(Duration::ZERO, |s| s.elapsed())
    }
}
