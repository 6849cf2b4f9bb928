//! Refresh rate calibration.
//!
//! The refresh rate follows the processing throughput on a logarithmic
//! curve: slow work refreshes slowly, and any throughput at or above the
//! calibration value refreshes at the maximum rate.

use std::time::Duration;

/// Slowest refresh rate, in frames per second.
pub const MIN_FPS: f64 = 2.0;

/// Fastest refresh rate, in frames per second.
pub const MAX_FPS: f64 = 60.0;

/// Refresh rate before any throughput was measured.
pub const BOOTSTRAP_FPS: f64 = 10.0;

/// Default calibration when counting items, or with a known total.
pub const COUNTING_CALIBRATION: f64 = 1e6;

/// Default calibration of manual bars without a total, whose rate is a
/// fraction per second.
pub const PERCENT_CALIBRATION: f64 = 1.0;

/// Maps a throughput to a refresh interval.
#[derive(Debug, Clone)]
pub struct Calibration {
    calibrate: f64,
    adjust: f64,
    factor: f64,
    fixed: Option<Duration>,
}

impl Calibration {
    /// Calibrate at `calibrate`, or `default` when unset.
    ///
    /// A positive `refresh_secs` disables calibration and refreshes at that
    /// fixed interval.
    pub fn new(calibrate: Option<f64>, default: f64, refresh_secs: f64) -> Self {
        let calibrate = calibrate.unwrap_or(default).max(1e-6);
        let adjust = 100.0 / calibrate.min(100.0);
        let factor = (MAX_FPS - MIN_FPS) / (calibrate * adjust + 1.0).log10();
        let fixed = (refresh_secs > 0.0).then(|| Duration::from_secs_f64(refresh_secs));
        Self {
            calibrate,
            adjust,
            factor,
            fixed,
        }
    }

    /// The calibration value in use.
    pub fn calibrate(&self) -> f64 {
        self.calibrate
    }

    /// Frames per second for a throughput.
    pub fn fps(&self, rate: f64) -> f64 {
        if rate <= 0.0 {
            BOOTSTRAP_FPS
        } else if rate < self.calibrate {
            (rate * self.adjust + 1.0).log10() * self.factor + MIN_FPS
        } else {
            MAX_FPS
        }
    }

    /// Time to wait before the next frame.
    pub fn interval(&self, rate: f64) -> Duration {
        self.fixed
            .unwrap_or_else(|| Duration::from_secs_f64(1.0 / self.fps(rate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bootstrap_without_rate() {
        let cal = Calibration::new(None, COUNTING_CALIBRATION, 0.0);
        assert_eq!(cal.fps(0.0), BOOTSTRAP_FPS);
        assert_eq!(cal.fps(-3.0), BOOTSTRAP_FPS);
    }

    #[test]
    fn test_curve_bounds() {
        let cal = Calibration::new(None, COUNTING_CALIBRATION, 0.0);
        assert!(cal.fps(1e-9) >= MIN_FPS);
        assert_eq!(cal.fps(COUNTING_CALIBRATION), MAX_FPS);
        assert_eq!(cal.fps(1e9), MAX_FPS);
        // the curve meets the maximum at the calibration
        assert!((cal.fps(COUNTING_CALIBRATION - 1e-3) - MAX_FPS).abs() < 1e-3);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let cal = Calibration::new(Some(500.0), COUNTING_CALIBRATION, 0.0);
        let mut last = 0.0;
        for rate in [0.01, 0.1, 1.0, 10.0, 100.0, 499.0, 500.0, 10_000.0] {
            let fps = cal.fps(rate);
            assert!(fps >= last, "fps({rate}) = {fps} < {last}");
            last = fps;
        }
    }

    #[test]
    fn test_small_calibration_is_adjusted() {
        let cal = Calibration::new(None, PERCENT_CALIBRATION, 0.0);
        assert_eq!(cal.calibrate(), 1.0);
        // halfway through the log curve at rate 0.5 with adjust 100
        let expected = (51.0f64).log10() * (58.0 / (101.0f64).log10()) + MIN_FPS;
        assert!(close(cal.fps(0.5), expected));
        assert_eq!(cal.fps(1.0), MAX_FPS);
    }

    #[test]
    fn test_zero_calibration_is_clamped() {
        let cal = Calibration::new(Some(0.0), COUNTING_CALIBRATION, 0.0);
        assert_eq!(cal.calibrate(), 1e-6);
        assert_eq!(cal.fps(1.0), MAX_FPS);
    }

    #[test]
    fn test_fixed_interval() {
        let cal = Calibration::new(None, COUNTING_CALIBRATION, 0.25);
        assert_eq!(cal.interval(0.0), Duration::from_millis(250));
        assert_eq!(cal.interval(1e9), Duration::from_millis(250));
    }

    #[test]
    fn test_interval_follows_fps() {
        let cal = Calibration::new(None, COUNTING_CALIBRATION, 0.0);
        assert_eq!(cal.interval(0.0), Duration::from_millis(100));
        assert_eq!(cal.interval(1e7), Duration::from_secs_f64(1.0 / MAX_FPS));
    }
}
