// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module turns configured watch entries into polling change
//! detectors. It knows nothing about templates or processes; detectors
//! observe file state, emit `FileChanged` and hand the entry to the
//! executor.
//!
//! Detection is deliberately polling-based with file size as the qualifying
//! signal: a content edit that preserves the size is not detected. That is
//! a documented limitation of the design, not an oversight.

pub mod detector;

pub use detector::{FileState, observe, spawn_detector};
