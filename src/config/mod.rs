// src/config/mod.rs

//! Configuration loading and merging for sentinel.
//!
//! Responsibilities:
//! - Define the JSON-backed data model (`model.rs`).
//! - Merge configuration layers recursively (`merge.rs`).
//! - Read and parse a config file from disk (`loader.rs`).

use std::sync::Arc;

use tokio::sync::RwLock;

pub mod loader;
pub mod merge;
pub mod model;

/// The configuration store as shared between the engine, the change
/// detectors and the executor. Mutated only through merges; everything else
/// takes read access.
pub type SharedConfig = Arc<RwLock<model::ConfigStore>>;

pub use loader::{default_config_path, global_config_path, read_config_file};
pub use merge::merge_value;
pub use model::{ConfigStore, ProcessorRef, WatchEntry};
