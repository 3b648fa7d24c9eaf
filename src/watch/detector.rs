// src/watch/detector.rs

use std::path::Path;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::config::WatchEntry;
use crate::events::{EngineEvent, EventChannel};
use crate::exec::ProcessorExecutor;

/// Observed metadata of a watched path at one poll tick.
///
/// A missing (or stat-failing) path observes as `{ exists: false, size: 0 }`,
/// so a file appearing or disappearing registers as a size change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileState {
    pub exists: bool,
    pub size: u64,
}

/// Stat a path into a [`FileState`].
pub async fn observe(path: impl AsRef<Path>) -> FileState {
    match tokio::fs::metadata(path.as_ref()).await {
        Ok(meta) => FileState {
            exists: true,
            size: meta.len(),
        },
        Err(_) => FileState {
            exists: false,
            size: 0,
        },
    }
}

/// Spawn a polling change detector for one watch entry.
///
/// The detector observes the entry's path once to seed a baseline, then
/// re-arms on every tick of `interval`. When the observed size differs from
/// the previous tick and the entry names a processor, it emits
/// `FileChanged` and then invokes the executor with the entry's own fields
/// as the substitution argument map. Entries sharing a path get independent
/// detectors; there is no deduplication.
///
/// The detector runs until the returned handle is aborted.
pub fn spawn_detector(
    entry: WatchEntry,
    interval: Duration,
    executor: ProcessorExecutor,
    events: EventChannel,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // First tick completes immediately; use it to seed the baseline.
        ticker.tick().await;
        let mut previous = observe(&entry.path).await;

        loop {
            ticker.tick().await;
            let current = observe(&entry.path).await;

            if current.size != previous.size {
                debug!(
                    path = %entry.path,
                    previous_size = previous.size,
                    current_size = current.size,
                    "watched file changed"
                );

                if let Some(processor) = entry.processor.clone() {
                    events.emit(EngineEvent::FileChanged {
                        entry: entry.clone(),
                        current,
                        previous,
                    });
                    executor.execute(&processor, &entry.as_args()).await;
                }
            }

            previous = current;
        }
    })
}
