//! alive-progress - animated progress bars and spinners for the terminal.
//!
//! Spinners and bars are described declaratively, compiled into frame
//! tables once, and played by a live engine that refreshes the line at a
//! rate calibrated to the throughput of the work.
//!
//! ```no_run
//! use alive_progress::{with_alive_bar, Config};
//!
//! let total = with_alive_bar(Some(3), &Config::default(), |bar| {
//!     for item in ["a", "b", "c"] {
//!         bar.println(format!("processing {item}"));
//!         bar.inc(1)?;
//!     }
//!     Ok::<_, alive_progress::ProgressError>(bar.count())
//! })??;
//! assert_eq!(total, 3);
//! # Ok::<(), alive_progress::ProgressError>(())
//! ```
//!
//! The `alive` binary plays the catalogs and manages `alive.toml`.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

include!(concat!(env!("OUT_DIR"), "/version.rs"));

pub mod animations;
pub mod cells;
pub mod cli;
pub mod config;
pub mod logging;
pub mod progress;
pub mod styles;
pub mod terminal;

pub use animations::{BarFactory, SpinnerFactory};
pub use config::{config_handler, Config, ConfigOptions};
pub use progress::{with_alive_bar, AliveBar, BarWriter, LogRoute, PauseGuard, ProgressError};
pub use terminal::{MemoryTerminal, Terminal};
