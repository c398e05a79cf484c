// src/engine/batch.rs

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::level_filters::LevelFilter;
use tracing::{Instrument, error, info};

use crate::config::RunnerSection;
use crate::engine::pipeline::{event_span, process_event, verify_event};
use crate::engine::{EngineContext, EventOutcome, Parallelism, RunMode};
use crate::logging::LogControl;

/// Per-path outcomes of one run, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<(PathBuf, EventOutcome)>,
}

impl BatchReport {
    fn new(mut outcomes: Vec<(PathBuf, EventOutcome)>) -> Self {
        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[(PathBuf, EventOutcome)] {
        &self.outcomes
    }

    pub fn get(&self, path: &Path) -> Option<&EventOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of events per outcome label.
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for (_, outcome) in self.outcomes.iter() {
            *counts.entry(outcome.label()).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_summary(&self) {
        let summary = self
            .counts()
            .iter()
            .map(|(label, n)| format!("{label}={n}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(events = self.len(), "run complete: {}", summary);
    }
}

/// Worker pool size for parallel execution.
///
/// An explicit `jobs` wins; otherwise `available_parallelism * jobs_per_cpu`,
/// capped by `max_jobs`. Never less than 1.
pub fn pool_size(jobs: Option<usize>, runner: &RunnerSection) -> usize {
    if let Some(jobs) = jobs {
        return jobs.max(1);
    }

    let cpus = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let size = cpus.saturating_mul(runner.jobs_per_cpu);
    runner.max_jobs.map_or(size, |max| size.min(max)).max(1)
}

/// Process every path according to `mode`.
///
/// Failures are contained per path: a failing or panicking event never
/// stops its siblings.
pub async fn run_batch(
    ctx: Arc<EngineContext>,
    paths: Vec<PathBuf>,
    mode: RunMode,
    log: Option<&LogControl>,
) -> BatchReport {
    info!(events = paths.len(), ?mode, "processing event files");

    let outcomes = match mode {
        RunMode::Verify => {
            // Surface every diagnostic while verifying; restored on drop.
            let _elevated = log.map(|control| control.elevate(LevelFilter::DEBUG));
            run_verify(&ctx, paths)
        }
        RunMode::Execute(Parallelism::Sequential) | RunMode::Execute(Parallelism::Pool(1)) => {
            run_sequential(&ctx, paths).await
        }
        RunMode::Execute(Parallelism::Pool(size)) => run_parallel(ctx, paths, size).await,
    };

    BatchReport::new(outcomes)
}

fn run_verify(ctx: &EngineContext, paths: Vec<PathBuf>) -> Vec<(PathBuf, EventOutcome)> {
    paths
        .into_iter()
        .map(|path| {
            let outcome = event_span(&path).in_scope(|| verify_event(ctx, &path));
            (path, outcome)
        })
        .collect()
}

async fn run_sequential(ctx: &EngineContext, paths: Vec<PathBuf>) -> Vec<(PathBuf, EventOutcome)> {
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = process_event(ctx, &path).instrument(event_span(&path)).await;
        outcomes.push((path, outcome));
    }
    outcomes
}

async fn run_parallel(
    ctx: Arc<EngineContext>,
    paths: Vec<PathBuf>,
    size: usize,
) -> Vec<(PathBuf, EventOutcome)> {
    let size = size.max(1);
    info!(pool_size = size, "running events in parallel");

    let semaphore = Arc::new(Semaphore::new(size));
    let mut handles = Vec::with_capacity(paths.len());

    for path in paths {
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        let task_path = path.clone();
        let span = event_span(&path);

        let handle = tokio::spawn(
            async move {
                let _permit = semaphore.acquire_owned().await;
                process_event(&ctx, &task_path).await
            }
            .instrument(span),
        );
        handles.push((path, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(path = ?path, error = %err, "event task aborted");
                EventOutcome::Failed(err.to_string())
            }
        };
        outcomes.push((path, outcome));
    }
    outcomes
}
