// src/trigger/status.rs

//! Durable `STATUS=enabled` -> `STATUS=triggered` transition.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::{error, info, warn};

use crate::config::kv::KvMap;
use crate::event::keys;
use crate::fs::FileSystem;
use crate::types::EventStatus;

/// Matches a `STATUS = enabled` assignment line, keeping spacing, optional
/// quotes, a trailing comment and a CR intact.
const STATUS_ASSIGNMENT: &str = r#"(?m)^(?P<lead>[ \t]*STATUS[ \t]*=[ \t]*)(?P<open>["']?)enabled(?P<close>["']?)(?P<trail>(?:[ \t]+#[^\r\n]*)?[ \t]*\r?)$"#;

const STATUS_REPLACEMENT: &str = "${lead}${open}triggered${close}${trail}";

static STATUS_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(STATUS_ASSIGNMENT));

/// Outcome of [`StatusWriter::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The file now reads `STATUS=triggered`.
    Updated,
    /// The file already read `STATUS=triggered`; nothing was written.
    AlreadyTriggered,
    /// No `STATUS=enabled` assignment to rewrite; nothing was written.
    NotEnabled(EventStatus),
    /// The write went through but a fresh read does not show `triggered`.
    Mismatch(EventStatus),
    /// Reading or writing the file failed.
    Failed(String),
}

impl CommitOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, CommitOutcome::Updated)
    }
}

/// Rewrites the STATUS field of event files in place.
///
/// The file on disk is the only source of truth: it is re-read before the
/// rewrite and again afterwards.
pub struct StatusWriter<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> StatusWriter<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Mark the event at `path` as triggered. Never returns an error; every
    /// failure is logged and reported through [`CommitOutcome`].
    pub fn commit(&self, path: &Path) -> CommitOutcome {
        let outcome = match self.commit_inner(path) {
            Ok(outcome) => outcome,
            Err(err) => CommitOutcome::Failed(format!("{err:#}")),
        };

        match &outcome {
            CommitOutcome::Updated => info!(path = ?path, "STATUS updated to triggered"),
            CommitOutcome::AlreadyTriggered => {
                warn!(path = ?path, "STATUS already changed to triggered; not rewriting")
            }
            CommitOutcome::NotEnabled(status) => {
                error!(path = ?path, status = %status, "no STATUS=enabled assignment to rewrite")
            }
            CommitOutcome::Mismatch(status) => {
                error!(path = ?path, status = %status, "STATUS rewrite did not take effect")
            }
            CommitOutcome::Failed(err) => {
                error!(path = ?path, error = %err, "failed to update STATUS")
            }
        }

        outcome
    }

    fn commit_inner(&self, path: &Path) -> Result<CommitOutcome> {
        let text = self.fs.read_to_string(path)?;
        match read_status(&text) {
            EventStatus::Triggered => return Ok(CommitOutcome::AlreadyTriggered),
            EventStatus::Enabled => {}
            other => return Ok(CommitOutcome::NotEnabled(other)),
        }

        let pattern = STATUS_RE.as_ref().map_err(Clone::clone)?;
        let rewritten = pattern.replace_all(&text, STATUS_REPLACEMENT);
        if matches!(rewritten, Cow::Borrowed(_)) {
            // Enabled per the parser, but not in a shape we can rewrite.
            return Ok(CommitOutcome::NotEnabled(EventStatus::Enabled));
        }

        self.fs.write(path, rewritten.as_bytes())?;

        let after = self.fs.read_to_string(path)?;
        match read_status(&after) {
            EventStatus::Triggered => Ok(CommitOutcome::Updated),
            other => Ok(CommitOutcome::Mismatch(other)),
        }
    }
}

fn read_status(text: &str) -> EventStatus {
    EventStatus::from_field(KvMap::parse(text).get(keys::STATUS))
}
