//! Logging setup for the binary
//!
//! Logs go to stderr so stdout only carries CSV output. The level comes from
//! `RUST_LOG` and defaults to `info`.

use std::io;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
