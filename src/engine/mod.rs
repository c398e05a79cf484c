// src/engine/mod.rs

//! Orchestration engine for triggerd.
//!
//! This module ties together, per event file:
//! - loading and verifying the record
//! - running its command and evaluating the test
//! - resolving and firing the trigger, then committing STATUS
//!
//! The per-event pipeline lives in [`pipeline`]; running it over a batch of
//! paths, sequentially or over a bounded worker pool, lives in [`batch`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::event::ValidationProblem;
use crate::exec::CommandRunner;
use crate::fs::FileSystem;
use crate::trigger::CommitOutcome;
use crate::types::{EventStatus, TriggerKind};

/// Shared, read-only collaborators for every processing task.
///
/// Nothing in here is mutated while a batch runs; each task owns its own
/// `EventRecord`.
#[derive(Clone)]
pub struct EngineContext {
    pub fs: Arc<dyn FileSystem>,
    pub runner: Arc<dyn CommandRunner>,
    pub triggers_file: PathBuf,
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineContext")
            .field("fs", &self.fs)
            .field("triggers_file", &self.triggers_file)
            .finish_non_exhaustive()
    }
}

/// How a batch of events is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    /// Fan out over at most this many concurrent tasks.
    Pool(usize),
}

/// What a run does with each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Validate and resolve triggers only; strictly sequential.
    Verify,
    /// Run commands and fire triggers.
    Execute(Parallelism),
}

/// Result of processing one event path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// STATUS is not `enabled`; nothing was run.
    NotEnabled(EventStatus),
    /// Verification found problems; nothing was run.
    Invalid(Vec<ValidationProblem>),
    /// Verify mode: the event is valid and would fire this trigger.
    Verified(TriggerKind),
    /// The command ran and the test did not pass.
    NotMatched,
    /// The test passed and a trigger action succeeded.
    Triggered {
        by: TriggerKind,
        fell_back: bool,
        commit: CommitOutcome,
    },
    /// The test passed but every trigger attempt failed.
    TriggerFailed,
    /// Loading the file or spawning the command failed.
    Failed(String),
}

impl EventOutcome {
    /// Short name used in the batch summary.
    pub fn label(&self) -> &'static str {
        match self {
            EventOutcome::NotEnabled(_) => "not_enabled",
            EventOutcome::Invalid(_) => "invalid",
            EventOutcome::Verified(_) => "verified",
            EventOutcome::NotMatched => "not_matched",
            EventOutcome::Triggered { .. } => "triggered",
            EventOutcome::TriggerFailed => "trigger_failed",
            EventOutcome::Failed(_) => "failed",
        }
    }
}

pub mod batch;
pub mod pipeline;

pub use batch::{BatchReport, pool_size, run_batch};
pub use pipeline::{event_span, process_event, verify_event};
