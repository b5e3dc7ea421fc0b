//! Logging setup and shared message helpers.
//!
//! The core only emits `tracing` events; the binary installs the subscriber.

use std::fmt::Display;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Per-target filter, e.g. `ROSTER_LOG=student_roster=debug`.
pub const LOG_ENV: &str = "ROSTER_LOG";

static INIT: Once = Once::new();

/// Install the stderr subscriber. Safe to call more than once.
///
/// `ROSTER_LOG` wins over `verbose` when it is set and valid.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}

/// Uniform prefix for user-facing error text.
pub fn error_message(msg: impl Display) -> String {
    format!("roster: {}", msg)
}

pub fn warn(msg: impl Display) {
    tracing::warn!("{}", msg);
}
