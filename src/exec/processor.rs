// src/exec/processor.rs

use std::process::Stdio;

use serde_json::{Map, Value};
use tokio::io::{self, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::{ProcessorRef, SharedConfig};
use crate::events::{EngineEvent, EventChannel};
use crate::exec::template::substitute;

/// Resolves processor references into shell commands and spawns them.
///
/// The executor is a cheap clone-able handle over the shared configuration
/// and the engine's event channel, so each change detector can carry its
/// own copy.
#[derive(Debug, Clone)]
pub struct ProcessorExecutor {
    config: SharedConfig,
    events: EventChannel,
}

impl ProcessorExecutor {
    pub fn new(config: SharedConfig, events: EventChannel) -> Self {
        Self { config, events }
    }

    /// Execute a processor reference against an argument map.
    ///
    /// A list reference executes each name in order against the same
    /// arguments; each dispatch is independent, so an earlier failure never
    /// short-circuits a later one. A name with no entry under `processors`
    /// is silently skipped.
    ///
    /// Returns one join handle per dispatched command; each resolves once
    /// its process has exited and its output has been forwarded. Dropping
    /// the handles detaches the processes; they keep running.
    pub async fn execute(
        &self,
        processor: &ProcessorRef,
        args: &Map<String, Value>,
    ) -> Vec<JoinHandle<()>> {
        let mut completions = Vec::new();
        for name in processor.names() {
            if let Some(handle) = self.execute_one(name, args).await {
                completions.push(handle);
            }
        }
        completions
    }

    /// Execute a single named processor.
    async fn execute_one(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Option<JoinHandle<()>> {
        let template = {
            let config = self.config.read().await;
            config.processor_template(name).map(str::to_string)
        };

        // A referenced-but-missing processor is not a failure condition.
        let Some(template) = template else {
            debug!(processor = %name, "no such processor, skipping");
            return None;
        };

        let command = substitute(&template, args);
        info!(processor = %name, command = %command, "executing processor");

        let completion = spawn_shell(name, &command);

        // Dispatch notification: the command may still be running.
        self.events.emit(EngineEvent::ProcessorExecuted {
            name: name.to_string(),
            template,
            command,
        });

        completion
    }
}

/// Spawn a resolved command string through the platform shell.
///
/// Stdout and stderr are captured and forwarded verbatim to this process's
/// own stdout/stderr once the command exits; a non-zero exit is logged, a
/// spawn-level failure likewise. Neither aborts anything else.
fn spawn_shell(name: &str, command: &str) -> Option<JoinHandle<()>> {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            error!(processor = %name, command = %command, %err, "failed to spawn processor");
            return None;
        }
    };

    let name = name.to_string();
    Some(tokio::spawn(async move {
        match child.wait_with_output().await {
            Ok(output) => {
                forward_output(&output.stdout, &output.stderr).await;
                if !output.status.success() {
                    warn!(
                        processor = %name,
                        exit_code = output.status.code().unwrap_or(-1),
                        "processor exited with failure"
                    );
                }
            }
            Err(err) => {
                error!(processor = %name, %err, "failed waiting for processor");
            }
        }
    }))
}

/// Write captured process output to our own stdout/stderr, byte for byte.
async fn forward_output(stdout: &[u8], stderr: &[u8]) {
    if !stdout.is_empty() {
        let mut sink = io::stdout();
        let _ = sink.write_all(stdout).await;
        let _ = sink.flush().await;
    }
    if !stderr.is_empty() {
        let mut sink = io::stderr();
        let _ = sink.write_all(stderr).await;
        let _ = sink.flush().await;
    }
}
