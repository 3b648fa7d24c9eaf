// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sentinel`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sentinel",
    version,
    about = "Watch files and run configured processors when they change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project config file (JSON).
    ///
    /// Default: `sentinel.json` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "sentinel.json")]
    pub config: String,

    /// Skip loading the user-global `~/.sentinel.json` layer.
    #[arg(long)]
    pub no_global: bool,

    /// Print config loads, file changes and processor dispatches.
    #[arg(short, long)]
    pub verbose: bool,

    /// Run the processor(s) of the entry matching this path once, then
    /// exit. No watching.
    #[arg(short, long, value_name = "PATH")]
    pub process: Option<String>,

    /// Poll interval of the change detectors, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub poll_interval_ms: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SENTINEL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
