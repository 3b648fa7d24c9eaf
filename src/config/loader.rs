// src/config/loader.rs

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::ConfigError;

/// Read and parse a JSON configuration file.
///
/// This is pure I/O + parsing; merging into the live configuration and the
/// `ConfigLoaded` notification are handled by
/// [`Sentinel::load_config`](crate::engine::Sentinel::load_config). Outcomes:
///
/// - missing path or not a regular file → [`ConfigError::NotFound`]
/// - read failure → [`ConfigError::Unreadable`]
/// - invalid JSON → [`ConfigError::Malformed`]
///
/// On success, returns the parsed tree together with the raw file bytes.
pub async fn read_config_file(path: impl AsRef<Path>) -> Result<(Value, Vec<u8>), ConfigError> {
    let path = path.as_ref();

    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|_| ConfigError::NotFound {
            path: path.to_path_buf(),
        })?;
    if !meta.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let parsed: Value =
        serde_json::from_slice(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((parsed, raw))
}

/// Default project-local config path: `sentinel.json` in the current
/// working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("sentinel.json")
}

/// User-global config path: `~/.sentinel.json`, if a home directory can be
/// resolved.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sentinel.json"))
}
