//! Logging setup for the binary.
//!
//! Library code emits `tracing` events (and a few `log` records from the
//! configuration loader, bridged into the same subscriber). `RUST_LOG`
//! overrides the level derived from `-v` flags.

use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Map a `-v` count to a default filter directive
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "jsdce=warn",
        1 => "jsdce=info",
        2 => "jsdce=debug",
        _ => "jsdce=trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Colour codes are only emitted when stderr is a terminal. Returns false
/// when a subscriber was already installed.
pub fn init_logging(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}
