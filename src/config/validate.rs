// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{Result, TriggerdError};

impl TryFrom<RawSettings> for Settings {
    type Error = crate::errors::TriggerdError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw.runner, raw.events, raw.triggers))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_runner(raw)?;
    validate_events(raw)?;
    Ok(())
}

fn validate_runner(raw: &RawSettings) -> Result<()> {
    if raw.runner.jobs_per_cpu == 0 {
        return Err(TriggerdError::ConfigError(
            "[runner].jobs_per_cpu must be >= 1 (got 0)".to_string(),
        ));
    }

    if raw.runner.max_jobs == Some(0) {
        return Err(TriggerdError::ConfigError(
            "[runner].max_jobs must be >= 1 (got 0)".to_string(),
        ));
    }

    if raw.runner.shell.trim().is_empty() {
        return Err(TriggerdError::ConfigError(
            "[runner].shell must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_events(raw: &RawSettings) -> Result<()> {
    if raw.events.extensions.is_empty() {
        return Err(TriggerdError::ConfigError(
            "[events].extensions must list at least one extension".to_string(),
        ));
    }

    for ext in raw.events.extensions.iter() {
        let trimmed = ext.trim_start_matches('.');
        if trimmed.is_empty() || trimmed.contains(['/', '\\', '*', '?', '[', '{']) {
            return Err(TriggerdError::ConfigError(format!(
                "[events].extensions contains an invalid extension '{}'",
                ext
            )));
        }
    }

    Ok(())
}
