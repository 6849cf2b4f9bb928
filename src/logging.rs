//! Logging setup.
//!
//! Compact timestamped records, quiet by default. Records are written
//! through [`LogRoute`], so while a bar runs they appear above it instead of
//! tearing its line; otherwise they go to stderr.
//!
//! `RUST_LOG` takes precedence over the level given to [`init_with_level`]:
//! ```bash
//! RUST_LOG=debug alive demo
//! RUST_LOG=alive_progress::progress=debug alive showtime
//! ```

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::progress::LogRoute;

/// Level used when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_LEVEL: &str = "warn";

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialise logging at `level`, a filter directive such as `info` or
/// `alive_progress=debug`, routing records above the active bar.
///
/// Only the first initialisation takes effect.
pub fn init_with_level(level: &str) {
    init_with_writer(level, LogRoute);
}

/// Initialise logging at `level`, writing records through `writer`.
///
/// Passing a bar's [`BarWriter`](crate::progress::BarWriter) pins every
/// record above that bar.
pub fn init_with_writer<W>(level: &str, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(level)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_writer(writer)
            .with_filter(filter);

        // an embedding application may already own the global subscriber
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// Initialise logging at [`DEFAULT_LEVEL`].
pub fn init() {
    init_with_level(DEFAULT_LEVEL);
}
