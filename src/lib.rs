// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod exec;
pub mod logging;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::global_config_path;
use crate::engine::{Sentinel, SentinelOptions};
use crate::events::EngineEvent;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the engine with its poll interval from the CLI
/// - (optional) verbose event printing
/// - the user-global and project-local config layers
/// - either a single manual processor run (`--process`) or the watch
///   lifecycle with Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let options = SentinelOptions {
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        ..SentinelOptions::default()
    };
    let mut sentinel = Sentinel::with_options(options);

    if args.verbose {
        spawn_event_printer(sentinel.subscribe());
    }

    // Config layers: user-global first, then project-local. A failed layer
    // is reported and skipped; it never prevents the next one.
    if !args.no_global {
        if let Some(path) = global_config_path() {
            load_layer(&sentinel, &path, args.verbose).await;
        }
    }
    load_layer(&sentinel, &PathBuf::from(&args.config), args.verbose).await;

    if let Some(target) = &args.process {
        return run_once(&sentinel, target).await;
    }

    // Watch until interrupted.
    sentinel.start().await;
    info!("watching; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    sentinel.stop().await;

    Ok(())
}

/// Load one config layer, reporting (but swallowing) any failure.
async fn load_layer(sentinel: &Sentinel, path: &PathBuf, verbose: bool) {
    if let Err(err) = sentinel.load_config(path).await {
        if verbose {
            eprintln!("{err}");
        }
        debug!(%err, "skipping config layer");
    }
}

/// `--process <PATH>`: execute the processor(s) of every entry whose path
/// matches, wait for the spawned commands to finish, and return.
async fn run_once(sentinel: &Sentinel, target: &str) -> Result<()> {
    let mut completions = Vec::new();

    for entry in sentinel.files().await {
        if entry.path == target {
            if let Some(processor) = entry.processor.clone() {
                let args = entry.as_args();
                completions.extend(sentinel.execute_processor(&processor, &args).await);
            }
        }
    }

    if completions.is_empty() {
        info!(path = %target, "no matching entry with a processor");
    }

    for handle in completions {
        let _ = handle.await;
    }

    Ok(())
}

/// Print engine events in a human-readable form (verbose mode).
fn spawn_event_printer(mut rx: broadcast::Receiver<EngineEvent>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => print_event(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    eprintln!("sentinel: event printer lagged, {skipped} events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

fn print_event(event: &EngineEvent) {
    match event {
        EngineEvent::ConfigLoaded { path, .. } => {
            println!("Config loaded: {}", path.display());
        }
        EngineEvent::FileChanged {
            entry,
            current,
            previous,
        } => {
            let delta = current.size as i64 - previous.size as i64;
            println!(
                "File changed: {} ({}b -> {}b = {:+}b)",
                entry.path, previous.size, current.size, delta
            );
        }
        EngineEvent::ProcessorExecuted {
            name,
            template,
            command,
        } => {
            println!("Processor executed: {name} ({template} -> {command})");
        }
        EngineEvent::Started => println!("Watching started"),
        EngineEvent::Stopped => println!("Watching stopped"),
    }
}
