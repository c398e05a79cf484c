// src/exec/mod.rs

//! Process execution layer.
//!
//! Event commands and trigger actions are shell command lines run through
//! `tokio::process::Command`. The engine only talks to the
//! [`CommandRunner`] trait so tests can script outcomes without spawning
//! processes.
//!
//! - [`runner`] defines the trait and the production [`ShellRunner`].

pub mod runner;

pub use runner::{CommandOutput, CommandRunner, RunFuture, ShellRunner};
