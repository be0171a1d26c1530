//! Diagnostics via `tracing`, written to stderr
//!
//! Stdout carries task output only.

use std::io;

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::domain::value_objects::LogLevel;

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_ENV: &str = "DECKHAND_LOG";

/// Pick the filter directive.
///
/// Precedence: `DECKHAND_LOG`, then `-v` (debug) / `-vv` (trace), then the
/// configured `log_level`.
pub fn filter_directive(verbose: u8, env_value: Option<String>, config_level: LogLevel) -> String {
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return value;
    }
    match verbose {
        0 => config_level.as_directive().to_string(),
        1 => LogLevel::Debug.as_directive().to_string(),
        _ => LogLevel::Trace.as_directive().to_string(),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbose: u8, config_level: LogLevel) {
    let directive = filter_directive(verbose, std::env::var(LOG_ENV).ok(), config_level);
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(config_level.as_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
