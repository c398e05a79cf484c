#![allow(dead_code)]

pub use triggerd_test_utils::builders;
pub use triggerd_test_utils::fake_runner::FakeRunner;
pub use triggerd_test_utils::{init_tracing, with_timeout};

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use triggerd::engine::EngineContext;
use triggerd::exec::{CommandOutput, CommandRunner, RunFuture, ShellRunner};
use triggerd::fs::{FileSystem, RealFileSystem};

pub type TestResult = Result<(), Box<dyn Error>>;

/// Write an event file into `dir` and return its path.
pub fn write_event(dir: &Path, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Engine context over the real filesystem with the given runner.
pub fn context(runner: Arc<dyn CommandRunner>, triggers_file: PathBuf) -> Arc<EngineContext> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    Arc::new(EngineContext {
        fs,
        runner,
        triggers_file,
    })
}

/// Runs everything through bash except `notify-send`, which is recorded and
/// reported as successful (test machines have no notification daemon).
#[derive(Debug, Default)]
pub struct NotifyShim {
    shell: ShellRunner,
    notifications: Mutex<Vec<String>>,
}

impl NotifyShim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl CommandRunner for NotifyShim {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a, CommandOutput> {
        self.shell.run(command)
    }

    fn run_status<'a>(&'a self, command: &'a str) -> RunFuture<'a, i32> {
        if command.starts_with("notify-send") {
            self.notifications.lock().unwrap().push(command.to_string());
            return Box::pin(async { Ok(0) });
        }
        self.shell.run_status(command)
    }
}
