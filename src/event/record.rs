// src/event/record.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::kv::KvMap;
use crate::config::loader::load_kv;
use crate::event::evaluate::Test;
use crate::exec::CommandOutput;
use crate::fs::FileSystem;
use crate::types::{EventStatus, TestType};

/// Recognized event file keys.
pub mod keys {
    pub const COMMAND: &str = "COMMAND";
    pub const EVENT_NAME: &str = "EVENT_NAME";
    pub const MATCH_CONTENT: &str = "MATCH_CONTENT";
    pub const MATCH_CRITERIA: &str = "MATCH_CRITERIA";
    pub const STATUS: &str = "STATUS";
    pub const TEST_TYPE: &str = "TEST_TYPE";
    pub const TRIGGER_CUSTOM: &str = "TRIGGER_CUSTOM";
    pub const TRIGGER_NAMED: &str = "TRIGGER_NAMED";
}

/// Typed view over one event definition file.
///
/// A record is built once per run for one path and owned by the task that
/// processes that path.
#[derive(Debug, Clone)]
pub struct EventRecord {
    path: PathBuf,
    fields: KvMap,
}

impl EventRecord {
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let fields =
            load_kv(fs, path).with_context(|| format!("loading event file {:?}", path))?;
        Ok(Self::from_map(path, fields))
    }

    pub fn from_map(path: impl Into<PathBuf>, fields: KvMap) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used to tag log lines.
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    pub fn command(&self) -> Option<&str> {
        self.field(keys::COMMAND)
    }

    pub fn event_name(&self) -> Option<&str> {
        self.field(keys::EVENT_NAME)
    }

    pub fn match_content(&self) -> Option<&str> {
        self.field(keys::MATCH_CONTENT)
    }

    pub fn match_criteria(&self) -> Option<&str> {
        self.field(keys::MATCH_CRITERIA)
    }

    pub fn test_type(&self) -> Option<&str> {
        self.field(keys::TEST_TYPE)
    }

    pub fn trigger_custom(&self) -> Option<&str> {
        self.field(keys::TRIGGER_CUSTOM)
    }

    pub fn trigger_named(&self) -> Option<&str> {
        self.field(keys::TRIGGER_NAMED)
    }

    pub fn status(&self) -> EventStatus {
        EventStatus::from_field(self.field(keys::STATUS))
    }

    /// Only `STATUS=enabled` events are run.
    pub fn enabled(&self) -> bool {
        self.status() == EventStatus::Enabled
    }

    /// The typed test for this record, if TEST_TYPE and MATCH_CRITERIA are
    /// usable.
    pub fn test_plan(&self) -> Option<Test> {
        let test_type: TestType = self.test_type()?.parse().ok()?;
        Test::from_fields(test_type, self.match_criteria()?, self.match_content()).ok()
    }

    /// Evaluate this record's test against a command result.
    ///
    /// Records whose test cannot be built never pass.
    pub fn test(&self, result: &CommandOutput) -> bool {
        self.test_plan().is_some_and(|t| t.evaluate(result))
    }
}
