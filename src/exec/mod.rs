// src/exec/mod.rs

//! Processor execution layer.
//!
//! This module resolves a processor name into its command template,
//! substitutes `{{key}}` placeholders from the triggering argument map, and
//! spawns the resolved command through the platform shell.
//!
//! - [`template`] owns placeholder substitution.
//! - [`processor`] owns template resolution and process spawning.

pub mod processor;
pub mod template;

pub use processor::ProcessorExecutor;
pub use template::substitute;
