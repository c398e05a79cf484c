// src/config/kv.rs

//! Reader for the flat `KEY=value` format shared by event files and the
//! trigger-definitions file.
//!
//! ```text
//! # comment
//! COMMAND = df --output=pcent / | tail -n 1 | tr -dc 0-9
//! EVENT_NAME = "root disk filling up"
//! STATUS=enabled
//! ```

use std::collections::BTreeMap;

use tracing::debug;

/// Parsed key/value pairs of one file. Later duplicate keys win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvMap {
    entries: BTreeMap<String, String>,
}

impl KvMap {
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!(line = idx + 1, "ignoring line without '='");
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                debug!(line = idx + 1, "ignoring assignment without a key");
                continue;
            }

            entries.insert(key.to_string(), parse_value(value.trim()));
        }

        Self { entries }
    }

    /// Value for `key`, treating an empty value the same as an absent one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Unquote a value, or strip a trailing ` # comment` from an unquoted one.
fn parse_value(value: &str) -> String {
    for quote in ['"', '\''] {
        let Some(inner) = value.strip_prefix(quote) else {
            continue;
        };
        if let Some(end) = inner.find(quote) {
            let rest = inner[end + quote.len_utf8()..].trim_start();
            if rest.is_empty() || rest.starts_with('#') {
                return inner[..end].to_string();
            }
        }
    }

    let comment = value
        .char_indices()
        .zip(value.chars().skip(1))
        .find(|((_, c), next)| c.is_whitespace() && *next == '#')
        .map(|((i, _), _)| i);

    match comment {
        Some(i) => value[..i].trim_end().to_string(),
        None => value.to_string(),
    }
}
