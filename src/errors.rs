// src/errors.rs

//! Crate-wide error types.
//!
//! Configuration loading is the only part of the engine with a structured
//! error taxonomy; each failure is returned as a value from
//! [`load_config`](crate::engine::Sentinel::load_config), never thrown past
//! the caller. Process-level failures (non-zero exits, spawn errors) are
//! reported through logging and output forwarding instead.

use std::path::PathBuf;

use thiserror::Error;

pub use anyhow::Result;

/// Failure modes of loading a JSON configuration file.
///
/// Exactly one of these (or success) is produced per load attempt. A failed
/// load leaves the configuration store unmodified, so one broken config
/// layer never prevents loading the next one.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path does not exist or is not a regular file.
    #[error("{}: the config file does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("{}: the config file could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("{}: the config file is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
