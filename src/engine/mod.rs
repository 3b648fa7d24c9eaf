// src/engine/mod.rs

//! The sentinel engine.
//!
//! [`Sentinel`] ties the pieces together:
//! - the shared configuration store and its merge/load operations,
//! - the per-entry change detectors (start/stop lifecycle),
//! - the processor executor,
//! - the owned event channel everything publishes to.

pub mod sentinel;

pub use sentinel::{Sentinel, SentinelOptions};
