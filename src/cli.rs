// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `triggerd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "triggerd",
    version,
    about = "Trigger an event or notification upon the output of a command.",
    long_about = None
)]
pub struct CliArgs {
    /// Event files and/or directories of event files.
    #[arg(value_name = "TARGETS")]
    pub targets: Vec<PathBuf>,

    /// Verify event files without execution.
    #[arg(long)]
    pub verify: bool,

    /// Process events one at a time instead of over a worker pool.
    #[arg(long)]
    pub sequential: bool,

    /// Worker pool size (defaults to a multiple of the CPU count).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Show event execution details (same as `--log-level debug`).
    #[arg(long)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--verbose`, `TRIGGERD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Trigger definitions file used by TRIGGER_NAMED.
    #[arg(long, value_name = "PATH")]
    pub triggers: Option<PathBuf>,

    /// Settings file (TOML).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
