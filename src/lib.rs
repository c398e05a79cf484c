// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod event;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod targets;
pub mod trigger;
pub mod types;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Settings, default_triggers_path, load_settings};
use crate::engine::{EngineContext, Parallelism, RunMode, pool_size, run_batch};
use crate::errors::{Result, TriggerdError};
use crate::exec::ShellRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging::LogControl;
use crate::targets::{DiscoveryOptions, discover_targets};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading
/// - target discovery
/// - the engine context (filesystem, shell runner, trigger definitions)
/// - the batch run in verify or execute mode
///
/// Per-event failures are logged and never make this return an error; only
/// bad settings or an empty target list do.
pub async fn run(args: CliArgs, log: LogControl) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    debug!(?settings, "settings loaded");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let options = DiscoveryOptions::from(&settings.events);
    let targets = discover_targets(fs.as_ref(), &args.targets, &options)?;
    if targets.is_empty() {
        return Err(TriggerdError::NoTargets);
    }

    let triggers_file = args
        .triggers
        .clone()
        .or_else(|| settings.triggers.file.clone())
        .unwrap_or_else(default_triggers_path);
    info!(?triggers_file, events = targets.len(), "event files resolved");

    let ctx = Arc::new(EngineContext {
        fs,
        runner: Arc::new(ShellRunner::new(settings.runner.shell.clone())),
        triggers_file,
    });

    let mode = run_mode(&args, &settings);
    let report = run_batch(ctx, targets, mode, Some(&log)).await;
    report.log_summary();

    Ok(())
}

/// Verify beats everything; `--sequential` or `parallel = false` force a
/// single worker.
fn run_mode(args: &CliArgs, settings: &Settings) -> RunMode {
    if args.verify {
        RunMode::Verify
    } else if args.sequential || !settings.runner.parallel {
        RunMode::Execute(Parallelism::Sequential)
    } else {
        RunMode::Execute(Parallelism::Pool(pool_size(args.jobs, &settings.runner)))
    }
}
