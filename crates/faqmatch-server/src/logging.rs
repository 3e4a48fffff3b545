//! Logging setup shared by the binaries

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays clean for CLI output. `RUST_LOG`
/// refines the filter on top of `default_level`.
pub fn init_logging(default_level: Level, json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(default_level.into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}
