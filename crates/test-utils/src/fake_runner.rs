use std::sync::{Arc, Mutex};

use triggerd::exec::{CommandOutput, CommandRunner, RunFuture};

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    status: i32,
    stdout: String,
}

/// A fake command runner that:
/// - records every command line it was asked to run
/// - answers from rules matched by substring (first match wins)
/// - otherwise reports exit 0 with empty output
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `needle` print `stdout` and exit with `status`.
    pub fn respond(self, needle: &str, status: i32, stdout: &str) -> Self {
        self.rules.lock().unwrap().push(Rule {
            needle: needle.to_string(),
            status,
            stdout: stdout.to_string(),
        });
        self
    }

    /// Commands containing `needle` exit with `status`.
    pub fn exit_with(self, needle: &str, status: i32) -> Self {
        self.respond(needle, status, "")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_containing(&self, needle: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(needle)).count()
    }

    fn answer(&self, command: &str) -> CommandOutput {
        self.calls.lock().unwrap().push(command.to_string());
        let rules = self.rules.lock().unwrap();
        match rules.iter().find(|r| command.contains(&r.needle)) {
            Some(rule) => CommandOutput {
                status: rule.status,
                stdout: rule.stdout.clone(),
            },
            None => CommandOutput {
                status: 0,
                stdout: String::new(),
            },
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a, CommandOutput> {
        let output = self.answer(command);
        Box::pin(async move { Ok(output) })
    }

    fn run_status<'a>(&'a self, command: &'a str) -> RunFuture<'a, i32> {
        let status = self.answer(command).status;
        Box::pin(async move { Ok(status) })
    }
}
