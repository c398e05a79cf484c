// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::kv::KvMap;
use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, TriggerdError};
use crate::fs::FileSystem;

const APP_DIR: &str = "triggerd";

/// Read and parse a `KEY=value` file through the given filesystem.
///
/// Every call re-reads the file; nothing is cached, so the on-disk content is
/// always the source of truth.
pub fn load_kv(fs: &dyn FileSystem, path: &Path) -> anyhow::Result<KvMap> {
    let text = fs.read_to_string(path)?;
    Ok(KvMap::parse(&text))
}

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; use [`load_settings`] for the
/// validated form.
pub fn load_settings_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let raw: RawSettings = toml::from_str(&contents)?;
    Ok(raw)
}

/// Resolve and load the settings for this run.
///
/// - An explicit path must exist.
/// - Otherwise the per-user default is used when present.
/// - Otherwise built-in defaults apply.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let raw = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(TriggerdError::ConfigError(format!(
                    "settings file {:?} does not exist",
                    path
                )));
            }
            load_settings_from_path(path)?
        }
        None => match default_settings_path() {
            Some(path) if path.is_file() => load_settings_from_path(&path)?,
            _ => RawSettings::default(),
        },
    };

    Settings::try_from(raw)
}

/// `<user config dir>/triggerd/triggerd.toml`, if a config dir is known.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("triggerd.toml"))
}

/// `<user config dir>/triggerd/triggers.conf`.
///
/// Falls back to a relative `triggers.conf` when the platform has no notion
/// of a user config directory.
pub fn default_triggers_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("triggers.conf"))
        .unwrap_or_else(|| PathBuf::from("triggers.conf"))
}
