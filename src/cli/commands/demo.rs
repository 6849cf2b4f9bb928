//! Demo command implementation.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use super::interrupt_flag;
use crate::config::ConfigOptions;
use crate::progress::{with_alive_bar, AliveBar, ProgressError};

/// Steps played when the total is unknown to the bar.
const UNKNOWN_STEPS: u64 = 1000;

/// Options of a demo run.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Total given to the bar, or `None` to hide it.
    pub total: Option<u64>,
    /// Set progress as a percentage.
    pub manual: bool,
    /// Simulated work per step.
    pub delay_ms: u64,
    /// Title override.
    pub title: Option<String>,
}

/// Run a bar over simulated work.
///
/// Messages are printed at every quarter, and the text changes halfway.
/// Ctrl+C stops early, leaving an incomplete receipt.
pub fn demo(config_path: Option<&Path>, options: &DemoOptions) -> Result<()> {
    let mut config_options = ConfigOptions::load(config_path)?;
    if options.manual {
        config_options.set_by_path("behaviour.manual", "true")?;
    }
    if let Some(title) = &options.title {
        config_options.set_by_path("widgets.title", title)?;
    }
    let config = config_options.resolve()?;

    let steps = match options.total {
        Some(0) | None => UNKNOWN_STEPS,
        Some(total) => total,
    };
    let delay = Duration::from_millis(options.delay_ms);
    let interrupted = interrupt_flag();

    with_alive_bar(options.total, &config, |bar| {
        run_steps(bar, steps, options.manual, delay, &|| {
            interrupted.load(Ordering::SeqCst)
        })
    })??;
    Ok(())
}

fn run_steps(
    bar: &AliveBar,
    steps: u64,
    manual: bool,
    delay: Duration,
    stop: &dyn Fn() -> bool,
) -> Result<(), ProgressError> {
    let quarter = (steps / 4).max(1);
    for step in 1..=steps {
        if stop() {
            info!(step, "Demo interrupted");
            break;
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        if manual {
            bar.set_percent(step as f64 / steps as f64)?;
        } else {
            bar.inc(1)?;
        }
        if step == steps / 2 {
            bar.text("halfway there");
        }
        if step % quarter == 0 {
            bar.println(format!("finished batch {}", step / quarter));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::terminal::MemoryTerminal;
    use std::sync::Arc;

    fn quiet() -> Config {
        Config {
            spinner: None,
            bar: None,
            elapsed: false,
            stats: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_run_steps_counts_and_prints() {
        let term = MemoryTerminal::non_interactive();
        let bar = AliveBar::with_terminal(Some(8), &quiet(), Arc::new(term.clone())).unwrap();
        run_steps(&bar, 8, false, Duration::ZERO, &|| false).unwrap();
        bar.finish();
        assert_eq!(
            term.contents(),
            "on 2: finished batch 1\non 4: finished batch 2\non 6: finished batch 3\n\
             on 8: finished batch 4\n8/8 [100%]\n"
        );
    }

    #[test]
    fn test_run_steps_stops_early() {
        let term = MemoryTerminal::non_interactive();
        let bar = AliveBar::with_terminal(Some(8), &quiet(), Arc::new(term.clone())).unwrap();
        run_steps(&bar, 8, false, Duration::ZERO, &|| true).unwrap();
        assert_eq!(bar.count(), 0);
        bar.finish();
        assert_eq!(term.contents(), "(!) 0/8 [0%]\n");
    }

    #[test]
    fn test_run_steps_manual() {
        let config = Config {
            manual: true,
            ..quiet()
        };
        let term = MemoryTerminal::non_interactive();
        let bar = AliveBar::with_terminal(None, &config, Arc::new(term.clone())).unwrap();
        run_steps(&bar, 4, true, Duration::ZERO, &|| false).unwrap();
        assert_eq!(bar.percent(), 1.0);
        bar.finish();
        assert!(term.contents().ends_with("100%\n"));
    }
}
