//! Logging setup.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. `RUST_LOG`
//! takes precedence over the level picked from the command line.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set
#[must_use]
pub fn default_level(debug: bool, silent: bool) -> Level {
    if debug {
        Level::DEBUG
    } else if silent {
        Level::ERROR
    } else {
        Level::INFO
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(debug: bool, silent: bool) {
    let level = default_level(debug, silent);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(debug)
        .without_time()
        .try_init();
}
