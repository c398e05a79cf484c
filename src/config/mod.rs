// src/config/mod.rs

//! Configuration loading for triggerd.
//!
//! Responsibilities:
//! - Read flat `KEY=value` files: event definitions and trigger
//!   definitions (`kv.rs`, `triggers.rs`).
//! - Define the optional TOML settings model (`model.rs`).
//! - Load files from disk (`loader.rs`).
//! - Validate settings invariants (`validate.rs`).

pub mod kv;
pub mod loader;
pub mod model;
pub mod triggers;
pub mod validate;

pub use kv::KvMap;
pub use loader::{
    default_settings_path, default_triggers_path, load_kv, load_settings, load_settings_from_path,
};
pub use model::{EventsSection, RawSettings, RunnerSection, Settings, TriggersSection};
pub use triggers::TriggerDefinitions;
