// src/logging.rs

//! Logging setup for `sentinel` using `tracing` + `tracing-subscriber`.
//!
//! The effective filter comes from, in order:
//! 1. the `--log-level` CLI flag (single level for everything)
//! 2. the `SENTINEL_LOG` environment variable, which accepts full
//!    `EnvFilter` directives (e.g. "debug" or "sentinel=trace,warn")
//! 3. a `warn` fallback, so verbose-mode event printing stays the primary
//!    output
//!
//! Logs go to stderr; stdout is reserved for forwarded processor output
//! and the verbose event printer.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

const ENV_VAR: &str = "SENTINEL_LOG";
const FALLBACK_DIRECTIVE: &str = "warn";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(directive_for(level)),
        None => EnvFilter::try_from_env(ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn directive_for(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
