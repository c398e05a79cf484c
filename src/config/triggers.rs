// src/config/triggers.rs

//! Store of named trigger commands.
//!
//! The file uses the same flat format as event files; each key is a trigger
//! name and each value a shell command template:
//!
//! ```text
//! mail = mail -s "triggerd: $EVENT_NAME" me@example.com < /dev/null
//! beep = paplay /usr/share/sounds/freedesktop/stereo/bell.oga
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::kv::KvMap;
use crate::config::loader::load_kv;
use crate::fs::FileSystem;

/// Read-only mapping from trigger name to command template.
#[derive(Debug, Clone)]
pub struct TriggerDefinitions {
    path: PathBuf,
    entries: KvMap,
}

impl TriggerDefinitions {
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let entries = load_kv(fs, path)
            .with_context(|| format!("loading trigger definitions from {:?}", path))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
