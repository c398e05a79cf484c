// tests/batch_parallel.rs

mod common;
use crate::common::builders::EventFileBuilder;
use crate::common::{FakeRunner, TestResult, context, init_tracing, with_timeout, write_event};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::tempdir;
use triggerd::engine::{BatchReport, Parallelism, RunMode, run_batch};
use triggerd::exec::{CommandOutput, CommandRunner, RunFuture};

/// Twelve events: every third one has a bad operand, the rest alternate
/// between matching and not matching `echo 42`.
fn populate(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    (0..12)
        .map(|i| {
            let criteria = if i % 2 == 0 { "eq" } else { "lt" };
            let operand = if i % 3 == 0 { "many" } else { "42" };
            let event = EventFileBuilder::new()
                .command(&format!("echo 42 && : event-{i:02}"))
                .event_name(&format!("event-{i}"))
                .test("arithmetic", criteria, operand)
                .build();
            write_event(dir, &format!("event-{i:02}.conf"), &event)
        })
        .collect()
}

fn labels(report: &BatchReport) -> Vec<(String, &'static str)> {
    report
        .outcomes()
        .iter()
        .map(|(path, outcome)| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            (name, outcome.label())
        })
        .collect()
}

fn contents(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pool_and_sequential_runs_agree() -> TestResult {
    init_tracing();
    with_timeout(async {
        let seq_dir = tempdir().unwrap();
        let par_dir = tempdir().unwrap();
        let seq_paths = populate(seq_dir.path()).unwrap();
        let par_paths = populate(par_dir.path()).unwrap();

        let seq_runner = Arc::new(FakeRunner::new().respond("echo 42", 0, "42"));
        let par_runner = Arc::new(FakeRunner::new().respond("echo 42", 0, "42"));

        let sequential = run_batch(
            context(seq_runner.clone(), seq_dir.path().join("triggers.conf")),
            seq_paths.clone(),
            RunMode::Execute(Parallelism::Sequential),
            None,
        )
        .await;
        let parallel = run_batch(
            context(par_runner.clone(), par_dir.path().join("triggers.conf")),
            par_paths.clone(),
            RunMode::Execute(Parallelism::Pool(4)),
            None,
        )
        .await;

        assert_eq!(labels(&sequential), labels(&parallel));
        assert_eq!(contents(&seq_paths), contents(&par_paths));

        // i = 2, 4, 8, 10 match and are not invalid.
        assert_eq!(parallel.counts().get("triggered"), Some(&4));
        assert_eq!(parallel.counts().get("invalid"), Some(&4));
        assert_eq!(parallel.counts().get("not_matched"), Some(&4));
        assert_eq!(par_runner.calls_containing("notify-send"), 4);
        assert_eq!(seq_runner.calls_containing("notify-send"), 4);

        Ok(())
    })
    .await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pool_of_one_runs_in_path_order() -> TestResult {
    let dir = tempdir()?;
    let paths = populate(dir.path())?;
    let runner = Arc::new(FakeRunner::new().respond("echo 42", 0, "42"));

    let report = run_batch(
        context(runner.clone(), dir.path().join("triggers.conf")),
        paths.clone(),
        RunMode::Execute(Parallelism::Pool(1)),
        None,
    )
    .await;

    assert_eq!(report.len(), paths.len());
    let commands: Vec<String> = runner
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("echo 42"))
        .collect();
    let expected: Vec<String> = [1, 2, 4, 5, 7, 8, 10, 11]
        .iter()
        .map(|i| format!("echo 42 && : event-{i:02}"))
        .collect();
    assert_eq!(commands, expected);
    Ok(())
}

/// Answers `42` after a short delay and records the highest number of
/// commands running at once.
#[derive(Debug, Default)]
struct GaugeRunner {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl GaugeRunner {
    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for GaugeRunner {
    fn run<'a>(&'a self, _command: &'a str) -> RunFuture<'a, CommandOutput> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(CommandOutput {
                status: 0,
                stdout: "42".to_string(),
            })
        })
    }

    fn run_status<'a>(&'a self, _command: &'a str) -> RunFuture<'a, i32> {
        Box::pin(async { Ok(0) })
    }
}

async fn peak_for(parallelism: Parallelism) -> usize {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..12)
        .map(|i| {
            let event = EventFileBuilder::new().build();
            write_event(dir.path(), &format!("gauge-{i:02}.conf"), &event).unwrap()
        })
        .collect();
    let runner = Arc::new(GaugeRunner::default());

    let report = run_batch(
        context(runner.clone(), dir.path().join("triggers.conf")),
        paths,
        RunMode::Execute(parallelism),
        None,
    )
    .await;

    assert_eq!(report.counts().get("triggered"), Some(&12));
    runner.peak()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pool_never_exceeds_its_size() -> TestResult {
    with_timeout(async {
        let peak = peak_for(Parallelism::Pool(3)).await;
        assert!(peak <= 3, "peak concurrency {peak} exceeds pool of 3");
        assert!(peak > 1, "pool of 3 never ran events concurrently");
        Ok(())
    })
    .await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sequential_runs_one_command_at_a_time() -> TestResult {
    with_timeout(async {
        assert_eq!(peak_for(Parallelism::Sequential).await, 1);
        assert_eq!(peak_for(Parallelism::Pool(1)).await, 1);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn every_event_is_processed_exactly_once() -> TestResult {
    let dir = tempdir()?;
    let paths = populate(dir.path())?;
    let runner = Arc::new(FakeRunner::new().respond("echo 42", 0, "42"));

    let report = run_batch(
        context(runner.clone(), dir.path().join("triggers.conf")),
        paths.clone(),
        RunMode::Execute(Parallelism::Pool(3)),
        None,
    )
    .await;

    let mut reported: Vec<PathBuf> = report.outcomes().iter().map(|(p, _)| p.clone()).collect();
    reported.dedup();
    assert_eq!(reported, paths);

    // A second pass finds the fired events already triggered.
    let again = run_batch(
        context(runner.clone(), dir.path().join("triggers.conf")),
        paths,
        RunMode::Execute(Parallelism::Pool(3)),
        None,
    )
    .await;
    assert_eq!(again.counts().get("not_enabled"), Some(&4));
    assert_eq!(again.counts().get("triggered"), None);
    assert_eq!(runner.calls_containing("notify-send"), 4);
    Ok(())
}
