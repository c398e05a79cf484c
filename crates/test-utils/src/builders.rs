#![allow(dead_code)]

use triggerd::config::KvMap;
use triggerd::event::{EventRecord, keys};

/// Builder for event file contents to simplify test setup.
///
/// Starts from a valid, enabled `arithmetic eq 42` event running `echo 42`.
#[derive(Debug, Clone)]
pub struct EventFileBuilder {
    fields: Vec<(String, String)>,
    spaced: bool,
}

impl EventFileBuilder {
    pub fn new() -> Self {
        Self {
            fields: vec![
                (keys::COMMAND.to_string(), "echo 42".to_string()),
                (keys::EVENT_NAME.to_string(), "answer".to_string()),
                (keys::TEST_TYPE.to_string(), "arithmetic".to_string()),
                (keys::MATCH_CRITERIA.to_string(), "eq".to_string()),
                (keys::MATCH_CONTENT.to_string(), "42".to_string()),
                (keys::STATUS.to_string(), "enabled".to_string()),
            ],
            spaced: false,
        }
    }

    /// Start with no fields at all.
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            spaced: false,
        }
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.fields.retain(|(k, _)| k != key);
        self
    }

    pub fn command(self, command: &str) -> Self {
        self.set(keys::COMMAND, command)
    }

    pub fn event_name(self, name: &str) -> Self {
        self.set(keys::EVENT_NAME, name)
    }

    pub fn test(self, test_type: &str, criteria: &str, content: &str) -> Self {
        self.set(keys::TEST_TYPE, test_type)
            .set(keys::MATCH_CRITERIA, criteria)
            .set(keys::MATCH_CONTENT, content)
    }

    pub fn status(self, status: &str) -> Self {
        self.set(keys::STATUS, status)
    }

    pub fn trigger_custom(self, command: &str) -> Self {
        self.set(keys::TRIGGER_CUSTOM, command)
    }

    pub fn trigger_named(self, name: &str) -> Self {
        self.set(keys::TRIGGER_NAMED, name)
    }

    /// Write `KEY = value` instead of `KEY=value`.
    pub fn spaced(mut self) -> Self {
        self.spaced = true;
        self
    }

    /// File contents, one assignment per line.
    pub fn build(&self) -> String {
        let sep = if self.spaced { " = " } else { "=" };
        self.fields
            .iter()
            .map(|(k, v)| format!("{k}{sep}{v}\n"))
            .collect()
    }

    pub fn record(&self, path: &str) -> EventRecord {
        EventRecord::from_map(path, KvMap::parse(&self.build()))
    }
}

impl Default for EventFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
