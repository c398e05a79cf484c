// src/exec/runner.rs

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

/// Boxed future returned by [`CommandRunner`] methods.
pub type RunFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// What an event command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was killed by a signal.
    pub status: i32,
    /// Decoded stdout with surrounding whitespace trimmed.
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Trait abstracting how shell command lines are executed.
///
/// A non-zero exit is a normal result, never an `Err`. Errors are reserved
/// for the shell not being spawnable at all.
pub trait CommandRunner: Send + Sync {
    /// Run `command` and capture its stdout and exit status. Stderr is
    /// drained and discarded.
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a, CommandOutput>;

    /// Run `command` for its exit status only (trigger actions).
    fn run_status<'a>(&'a self, command: &'a str) -> RunFuture<'a, i32>;
}

/// Production runner: `<shell> -c <command line>`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(line).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a, CommandOutput> {
        Box::pin(async move {
            // `output()` drains stdout and stderr while waiting on the child.
            let output = self
                .command(command)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .with_context(|| format!("spawning {} for command '{}'", self.shell, command))?;

            let status = output.status.code().unwrap_or(-1);
            if !output.stderr.is_empty() {
                debug!(
                    status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                    "command wrote to stderr"
                );
            }

            Ok(CommandOutput {
                status,
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            })
        })
    }

    fn run_status<'a>(&'a self, command: &'a str) -> RunFuture<'a, i32> {
        Box::pin(async move {
            let status = self
                .command(command)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .with_context(|| format!("spawning {} for trigger '{}'", self.shell, command))?;

            Ok(status.code().unwrap_or(-1))
        })
    }
}
