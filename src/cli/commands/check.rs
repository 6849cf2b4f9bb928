//! Check command implementations.
//!
//! `alive check NAME` compiles a catalog style and prints what came out.

use anyhow::{anyhow, Result};

use super::animate;
use crate::animations::CompiledSpec;
use crate::styles;
use crate::terminal;

/// Bar length used when none is given.
pub const DEFAULT_BAR_LENGTH: usize = 20;

/// Percentages a bar is checked at.
const BAR_SAMPLES: &[f64] = &[0.0, 0.15, 0.5, 0.85, 1.0, 1.2];

/// Print the check report of a spinner, animating it at verbosity 3 to 5.
///
/// Names only found in the bar catalog are checked as bars.
pub fn check(name: &str, verbosity: u8, length: Option<usize>, seconds: Option<f64>) -> Result<()> {
    let Some(factory) = styles::spinner(name) else {
        if styles::bar(name).is_some() {
            return check_bar(name, length);
        }
        return Err(anyhow!(
            "Unknown spinner: {name}. Run `alive showtime` to list them."
        ));
    };

    let runner = factory.compile(length)?;
    println!("{}", runner.spec().check(verbosity));

    if CompiledSpec::wants_animation(verbosity) {
        let term = terminal::select(None, false, 80);
        if term.is_interactive() {
            let mut player = runner.into_player();
            println!();
            animate(&*term, seconds, |term, _| {
                term.carriage_return();
                term.write(&format!("|{}|", player.next_frame()));
            });
        }
    }
    Ok(())
}

/// Print a bar rendered at a few percentages, live and finished.
pub fn check_bar(name: &str, length: Option<usize>) -> Result<()> {
    let factory = styles::bar(name)
        .ok_or_else(|| anyhow!("Unknown bar: {name}. Run `alive showtime bars` to list them."))?
        .build()?;
    let length = length.unwrap_or(DEFAULT_BAR_LENGTH);
    let bar = factory.compile(length)?;

    println!("\x1b[1mBar: {name}\x1b[0m (length {length})");
    println!();
    for &percent in BAR_SAMPLES {
        println!("  {:>4.0}%  {}", percent * 100.0, bar.render(percent, false));
    }
    println!();
    for &percent in BAR_SAMPLES {
        println!("  {:>4.0}%  {}  (end)", percent * 100.0, bar.render(percent, true));
    }
    Ok(())
}
