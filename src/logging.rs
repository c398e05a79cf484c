// src/logging.rs

//! Logging setup for `triggerd` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `--verbose` (debug)
//! 3. `TRIGGERD_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `info`
//!
//! Logs go to STDERR, or to `--log-file` when given. The level filter sits
//! behind a reload layer so a run can raise verbosity temporarily through
//! [`LogControl`].

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt, reload};

use crate::cli::LogLevel;

/// Handle on the installed subscriber's level filter.
#[derive(Clone)]
pub struct LogControl {
    handle: reload::Handle<LevelFilter, Registry>,
}

impl std::fmt::Debug for LogControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogControl")
            .field("level", &self.level())
            .finish()
    }
}

impl LogControl {
    pub fn level(&self) -> Option<LevelFilter> {
        self.handle.clone_current()
    }

    /// Raise the level to at least `level` until the guard is dropped.
    ///
    /// A level that is already at least as verbose is left alone.
    pub fn elevate(&self, level: LevelFilter) -> LevelGuard {
        let previous = self.level();
        if previous.is_some_and(|current| current >= level) {
            return LevelGuard {
                handle: None,
                previous,
            };
        }

        if let Err(err) = self.handle.modify(|filter| *filter = level) {
            warn!(error = %err, "could not raise log level");
            return LevelGuard {
                handle: None,
                previous,
            };
        }

        LevelGuard {
            handle: Some(self.handle.clone()),
            previous,
        }
    }
}

/// Restores the previous level on drop.
pub struct LevelGuard {
    handle: Option<reload::Handle<LevelFilter, Registry>>,
    previous: Option<LevelFilter>,
}

impl Drop for LevelGuard {
    fn drop(&mut self) {
        if let (Some(handle), Some(previous)) = (self.handle.take(), self.previous) {
            let _ = handle.modify(|filter| *filter = previous);
        }
    }
}

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(
    cli_level: Option<LogLevel>,
    verbose: bool,
    log_file: Option<&Path>,
) -> Result<LogControl> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None if verbose => LevelFilter::DEBUG,
        None => std::env::var("TRIGGERD_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(LevelFilter::INFO),
    };

    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        // Keep stdout free.
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let (filter, handle) = reload::Layer::new(level);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(log_file.is_none())
                .with_writer(writer),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(LogControl { handle })
}

fn level_from_log_level(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
