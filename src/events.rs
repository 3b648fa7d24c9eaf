// src/events.rs

//! Engine event notifications.
//!
//! The engine owns one [`EventChannel`] and publishes every observable
//! transition through it; external observers (the CLI's verbose printer,
//! tests) attach via [`EventChannel::subscribe`]. The channel has no logic
//! of its own beyond fan-out delivery.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;

use crate::config::WatchEntry;
use crate::watch::FileState;

/// Default capacity of the broadcast buffer behind an [`EventChannel`].
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Notifications published by the engine.
///
/// Ordering guarantees: within one config load, `ConfigLoaded` arrives
/// after the merge has completed; within one change detection, `FileChanged`
/// arrives strictly before the matching `ProcessorExecuted`. No ordering is
/// guaranteed across independent detectors or independent loads.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A configuration file was read, parsed and merged.
    ConfigLoaded {
        path: PathBuf,
        parsed: Value,
        raw: Arc<[u8]>,
    },

    /// A watched file's observed size changed between two polls.
    FileChanged {
        entry: WatchEntry,
        current: FileState,
        previous: FileState,
    },

    /// A processor command was dispatched. This is about dispatch, not exit
    /// status: the command may still be running when this arrives.
    ProcessorExecuted {
        name: String,
        template: String,
        command: String,
    },

    /// Watching has begun for all configured entries.
    Started,

    /// All change detectors have been torn down.
    Stopped,
}

/// Publish/subscribe fan-out for [`EngineEvent`]s.
///
/// Cloning shares the underlying channel, so the watcher and executor can
/// each hold a handle onto the same stream of subscribers.
#[derive(Debug, Clone)]
pub struct EventChannel {
    tx: broadcast::Sender<EngineEvent>,
}

impl EventChannel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Attach a new subscriber. Each subscriber sees every event emitted
    /// after the subscription point.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    /// Deliver an event to all current subscribers. Emitting with no
    /// subscribers attached is not an error.
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
