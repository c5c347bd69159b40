//! Diagnostic logging using `tracing` and `tracing-subscriber`.
//!
//! The styled terminal report goes to stdout; log events go to stderr so they
//! never mix with piped output.
//!
//! - 0 (no `-v`): warn level
//! - 1 (`-v`): info level
//! - 2 (`-vv`): debug level
//! - 3+ (`-vvv`): trace level
//!
//! `RUST_LOG` overrides the verbosity flag when set.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map the `-v` count to a log level
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the global tracing subscriber. Call once at startup.
///
/// A second call is a no-op rather than a panic.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_from_verbosity(verbosity));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
/// Dependencies stay at warn to keep polars and calamine quiet.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,cdecount={}", level_str)))
}
