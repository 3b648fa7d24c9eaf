// src/engine/sentinel.rs

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::{ConfigStore, ProcessorRef, SharedConfig, WatchEntry, loader};
use crate::errors::ConfigError;
use crate::events::{DEFAULT_EVENT_CAPACITY, EngineEvent, EventChannel};
use crate::exec::ProcessorExecutor;
use crate::watch;

/// Tunables for a [`Sentinel`] instance.
#[derive(Debug, Clone)]
pub struct SentinelOptions {
    /// Tick interval of every change detector.
    pub poll_interval: Duration,

    /// Buffer capacity of the event channel.
    pub event_capacity: usize,
}

impl Default for SentinelOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// The file-watch-and-react engine.
///
/// A `Sentinel` owns:
/// - the merged configuration tree (watch entries + processor templates),
/// - an event channel external observers subscribe to,
/// - the change detectors installed between [`start`](Self::start) and
///   [`stop`](Self::stop).
///
/// Configuration layers compose through [`merge_config`](Self::merge_config)
/// and [`load_config`](Self::load_config); one failed layer never prevents
/// the next, and the engine keeps running after any single failure.
#[derive(Debug)]
pub struct Sentinel {
    config: SharedConfig,
    events: EventChannel,
    executor: ProcessorExecutor,
    poll_interval: Duration,

    /// Active change detectors, keyed by the watched path. Entries sharing
    /// a path stack their detectors under the same key and are torn down
    /// together.
    watches: HashMap<String, Vec<JoinHandle<()>>>,
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl Sentinel {
    pub fn new() -> Self {
        Self::with_options(SentinelOptions::default())
    }

    pub fn with_options(options: SentinelOptions) -> Self {
        Self::from_store(ConfigStore::new(), options)
    }

    /// Construct with an initial configuration layer already merged.
    pub fn with_config(initial: Value) -> Self {
        let mut store = ConfigStore::new();
        store.merge(initial);
        Self::from_store(store, SentinelOptions::default())
    }

    fn from_store(store: ConfigStore, options: SentinelOptions) -> Self {
        let config: SharedConfig = Arc::new(RwLock::new(store));
        let events = EventChannel::new(options.event_capacity);
        let executor = ProcessorExecutor::new(Arc::clone(&config), events.clone());

        Self {
            config,
            events,
            executor,
            poll_interval: options.poll_interval,
            watches: HashMap::new(),
        }
    }

    /// Attach an observer to the engine's event channel.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Merge a programmatic configuration layer into the store.
    pub async fn merge_config(&self, incoming: Value) {
        self.config.write().await.merge(incoming);
    }

    /// Load a JSON configuration file and merge it into the store.
    ///
    /// Every outcome is delivered exactly once through the returned
    /// `Result`; no failure escapes as a panic. On success a `ConfigLoaded`
    /// event carrying the path, the parsed tree and the raw bytes is
    /// emitted after the merge has completed and before this returns. On
    /// failure the store is left unmodified.
    pub async fn load_config(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let (parsed, raw) = loader::read_config_file(path).await?;

        self.config.write().await.merge(parsed.clone());
        info!(path = %path.display(), "config loaded");

        self.events.emit(EngineEvent::ConfigLoaded {
            path: path.to_path_buf(),
            parsed,
            raw: Arc::from(raw),
        });

        Ok(())
    }

    /// A snapshot of the configured watch entries.
    pub async fn files(&self) -> Vec<WatchEntry> {
        self.config.read().await.files()
    }

    /// A snapshot of the raw merged configuration tree.
    pub async fn config_snapshot(&self) -> Value {
        self.config.read().await.root().clone()
    }

    /// Install a change detector for every configured watch entry, then
    /// emit `Started`.
    ///
    /// Entries without a processor still get a detector; whether a change
    /// dispatches anything is decided at fire time against the entry.
    /// Calling `start` again without an intervening `stop` stacks
    /// additional detectors.
    pub async fn start(&mut self) {
        let entries = self.files().await;
        info!(entries = entries.len(), "starting watch");

        for entry in entries {
            let path = entry.path.clone();
            let handle = watch::spawn_detector(
                entry,
                self.poll_interval,
                self.executor.clone(),
                self.events.clone(),
            );
            self.watches.entry(path).or_default().push(handle);
        }

        self.events.emit(EngineEvent::Started);
    }

    /// Tear down the detectors of every configured entry by path, then emit
    /// `Stopped`.
    ///
    /// Idempotent: a path with no active detector is a no-op. Already
    /// dispatched external processes are unaffected and run to completion.
    pub async fn stop(&mut self) {
        for entry in self.files().await {
            if let Some(handles) = self.watches.remove(&entry.path) {
                debug!(path = %entry.path, detectors = handles.len(), "unwatching");
                for handle in handles {
                    handle.abort();
                }
            }
        }

        self.events.emit(EngineEvent::Stopped);
    }

    /// Execute a processor (or list of processors) against an argument map.
    ///
    /// See [`ProcessorExecutor::execute`] for the dispatch semantics and
    /// the meaning of the returned handles.
    pub async fn execute_processor(
        &self,
        processor: &ProcessorRef,
        args: &Map<String, Value>,
    ) -> Vec<JoinHandle<()>> {
        self.executor.execute(processor, args).await
    }
}
